use crate::error::Result;
use crate::pair::PairList;

/// Base name shared by every downloaded export.
pub const EXPORT_STEM: &str = "ten-nhan-vat";

/// Fixed CSV header row ("Han", "Translated name").
pub const CSV_HEADER: &str = "Hán,Tên dịch";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExportFormat {
    #[default]
    Text,
    Csv,
    Json,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [Self::Text, Self::Csv, Self::Json];

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Text => "text/plain",
            Self::Csv => "text/csv",
            Self::Json => "application/json",
        }
    }

    /// `ten-nhan-vat.<ext>`
    pub fn file_name(&self) -> String {
        format!("{EXPORT_STEM}.{}", self.extension())
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.extension().eq_ignore_ascii_case(ext))
    }

    pub fn render(&self, pairs: &PairList) -> Result<String> {
        match self {
            Self::Text => Ok(to_text(pairs)),
            Self::Csv => Ok(to_csv(pairs)),
            Self::Json => to_json(pairs),
        }
    }
}

/// `{han} = {name}` per line, no trailing newline. Also the clipboard form.
pub fn to_text(pairs: &PairList) -> String {
    pairs
        .iter()
        .map(|p| format!("{} = {}", p.han, p.name))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Header line, then `{han},{name}` per line.
///
/// Fields are not quoted: a comma inside a name comes out as an extra column.
pub fn to_csv(pairs: &PairList) -> String {
    let rows: Vec<String> = pairs
        .iter()
        .map(|p| format!("{},{}", p.han, p.name))
        .collect();
    format!("{CSV_HEADER}\n{}", rows.join("\n"))
}

/// Pretty JSON array with two-space indent; keys `han` then `name`.
pub fn to_json(pairs: &PairList) -> Result<String> {
    Ok(serde_json::to_string_pretty(pairs)?)
}
