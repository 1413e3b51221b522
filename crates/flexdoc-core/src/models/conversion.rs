use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ClientError;

/// Conversion tags accepted by the backend's `conversion_type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionType {
    PdfToExcel,
    PdfToCsv,
    PdfToDocx,
    PdfToPowerpoint,
    CompressPdf,
    ExtractPdfText,
    DocxToPdf,
    MarkdownToPdf,
    ExcelToJson,
    ImageToPdf,
    ExtractZip,
}

/// Grouping used when presenting the conversion catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionCategory {
    Pdf,
    Document,
    Data,
    Media,
    Archive,
}

impl ConversionType {
    pub const ALL: [ConversionType; 11] = [
        ConversionType::PdfToExcel,
        ConversionType::PdfToCsv,
        ConversionType::PdfToDocx,
        ConversionType::PdfToPowerpoint,
        ConversionType::CompressPdf,
        ConversionType::ExtractPdfText,
        ConversionType::DocxToPdf,
        ConversionType::MarkdownToPdf,
        ConversionType::ExcelToJson,
        ConversionType::ImageToPdf,
        ConversionType::ExtractZip,
    ];

    /// Wire tag sent in the multipart `conversion_type` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConversionType::PdfToExcel => "pdf_to_excel",
            ConversionType::PdfToCsv => "pdf_to_csv",
            ConversionType::PdfToDocx => "pdf_to_docx",
            ConversionType::PdfToPowerpoint => "pdf_to_powerpoint",
            ConversionType::CompressPdf => "compress_pdf",
            ConversionType::ExtractPdfText => "extract_pdf_text",
            ConversionType::DocxToPdf => "docx_to_pdf",
            ConversionType::MarkdownToPdf => "markdown_to_pdf",
            ConversionType::ExcelToJson => "excel_to_json",
            ConversionType::ImageToPdf => "image_to_pdf",
            ConversionType::ExtractZip => "extract_zip",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ConversionType::PdfToExcel => "PDF to Excel",
            ConversionType::PdfToCsv => "PDF to CSV",
            ConversionType::PdfToDocx => "PDF to Word",
            ConversionType::PdfToPowerpoint => "PDF to PowerPoint",
            ConversionType::CompressPdf => "Compress PDF",
            ConversionType::ExtractPdfText => "Extract PDF Text",
            ConversionType::DocxToPdf => "Word to PDF",
            ConversionType::MarkdownToPdf => "Markdown to PDF",
            ConversionType::ExcelToJson => "Excel to JSON",
            ConversionType::ImageToPdf => "Image to PDF",
            ConversionType::ExtractZip => "Extract ZIP",
        }
    }

    pub fn category(&self) -> ConversionCategory {
        match self {
            ConversionType::PdfToExcel
            | ConversionType::PdfToCsv
            | ConversionType::PdfToDocx
            | ConversionType::PdfToPowerpoint
            | ConversionType::CompressPdf
            | ConversionType::ExtractPdfText => ConversionCategory::Pdf,
            ConversionType::DocxToPdf | ConversionType::MarkdownToPdf => {
                ConversionCategory::Document
            }
            ConversionType::ExcelToJson => ConversionCategory::Data,
            ConversionType::ImageToPdf => ConversionCategory::Media,
            ConversionType::ExtractZip => ConversionCategory::Archive,
        }
    }

    /// (source, target) format pair for display.
    pub fn formats(&self) -> (&'static str, &'static str) {
        match self {
            ConversionType::PdfToExcel => ("PDF", "XLSX"),
            ConversionType::PdfToCsv => ("PDF", "CSV"),
            ConversionType::PdfToDocx => ("PDF", "DOCX"),
            ConversionType::PdfToPowerpoint => ("PDF", "PPTX"),
            ConversionType::CompressPdf => ("PDF", "PDF"),
            ConversionType::ExtractPdfText => ("PDF", "TXT"),
            ConversionType::DocxToPdf => ("DOCX", "PDF"),
            ConversionType::MarkdownToPdf => ("MD", "PDF"),
            ConversionType::ExcelToJson => ("XLSX", "JSON"),
            ConversionType::ImageToPdf => ("JPG/PNG", "PDF"),
            ConversionType::ExtractZip => ("ZIP", "Files"),
        }
    }
}

impl fmt::Display for ConversionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConversionType {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConversionType::ALL
            .into_iter()
            .find(|ct| ct.as_str() == s)
            .ok_or_else(|| ClientError::InvalidInput(format!("Unknown conversion type: {}", s)))
    }
}
