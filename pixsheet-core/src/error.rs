use thiserror::Error;

#[derive(Debug, Error)]
pub enum SheetError {
    #[error("xlsx write failed: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid xlsx archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("malformed xml: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("malformed xml attribute: {0}")]
    XmlAttr(#[from] quick_xml::events::attributes::AttrError),

    #[error("workbook is missing part {0}")]
    MissingPart(&'static str),

    #[error("out of range: {0}")]
    OutOfRange(String),
}
