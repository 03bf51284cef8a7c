use super::query::LogQuery;
use super::record::Access;

pub const DETAILS_DATE_FORMAT: &str = "%d %b %Y, %H:%M:%S";
pub const TABLE_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    fn error(text: String) -> Self {
        Self {
            level: NoticeLevel::Error,
            text,
        }
    }

    fn warning(text: String) -> Self {
        Self {
            level: NoticeLevel::Warning,
            text,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Id,
    Ip,
    Data,
    Pagina,
    Url,
}

impl Column {
    pub const ALL: [Column; 5] = [Column::Id, Column::Ip, Column::Data, Column::Pagina, Column::Url];

    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "id" => Some(Column::Id),
            "ip" => Some(Column::Ip),
            "data" => Some(Column::Data),
            "pagina" => Some(Column::Pagina),
            "url" => Some(Column::Url),
            _ => None,
        }
    }

    pub fn header(&self) -> &'static str {
        match self {
            Column::Id => "ID",
            Column::Ip => "IP",
            Column::Data => "DATA",
            Column::Pagina => "PAGINA",
            Column::Url => "URL",
        }
    }

    pub fn value(&self, access: &Access) -> String {
        match self {
            Column::Id => access.id.to_string(),
            Column::Ip => access.ip.clone(),
            Column::Data => access.formatted_date(TABLE_DATE_FORMAT),
            Column::Pagina => access.path.clone(),
            Column::Url => access.full_path.clone(),
        }
    }

    /// `tot` selects every column; otherwise a comma list with unknown names dropped.
    pub fn parse_list(spec: &str) -> Vec<Column> {
        if spec == "tot" {
            return Column::ALL.to_vec();
        }
        spec.split(',').filter_map(Column::parse).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

/// Access counts per path over the whole log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageStats {
    /// Distinct paths in first-seen order.
    pub counts: Vec<(String, usize)>,
    pub least: Vec<String>,
    pub least_count: usize,
    pub most: Vec<String>,
    pub most_count: usize,
}

impl PageStats {
    pub fn from_records(records: &[Access]) -> Option<Self> {
        let mut counts: Vec<(String, usize)> = Vec::new();
        for access in records {
            match counts.iter_mut().find(|(path, _)| *path == access.path) {
                Some((_, n)) => *n += 1,
                None => counts.push((access.path.clone(), 1)),
            }
        }

        let least_count = counts.iter().map(|(_, n)| *n).min()?;
        let most_count = counts.iter().map(|(_, n)| *n).max()?;
        let with_count = |target: usize| {
            counts
                .iter()
                .filter(|(_, n)| *n == target)
                .map(|(p, _)| p.clone())
                .collect::<Vec<_>>()
        };

        Some(Self {
            least: with_count(least_count),
            most: with_count(most_count),
            least_count,
            most_count,
            counts,
        })
    }
}

/// Everything the `/log` page shows, computed from a snapshot of the log.
#[derive(Debug, Clone, PartialEq)]
pub struct LogReport {
    pub total: usize,
    pub current_id: u64,
    pub show_count: bool,
    pub notices: Vec<Notice>,
    pub selection: Vec<Access>,
    pub details: bool,
    pub table: Option<Table>,
    pub stats: Option<PageStats>,
    /// Shown after the statistics when `ultimele` asked for more than exist.
    pub final_warning: Option<String>,
}

impl LogReport {
    pub fn build(records: &[Access], query: &LogQuery, current_id: u64) -> Self {
        let total = records.len();
        let mut notices = Vec::new();
        let mut final_warning = None;
        let mut selection: Vec<Access> = records.to_vec();

        if let Some(raw) = &query.ultimele {
            match raw.trim().parse::<i64>() {
                Ok(n) if n > 0 => {
                    let n = n as usize;
                    if n > total {
                        final_warning = Some(format!(
                            "Exista doar {total} accesari fata de {n} accesari cerute"
                        ));
                    } else {
                        selection = records[total - n..].to_vec();
                    }
                }
                _ => notices.push(Notice::error(format!(
                    "Eroare: Valoarea '{raw}' nu este o valoare numerică întreagă validă."
                ))),
            }
        }

        if !query.iduri.is_empty() {
            let mut picked = Vec::new();
            let mut seen = Vec::new();
            for group in &query.iduri {
                for raw_id in group.split(',').map(str::trim).filter(|s| !s.is_empty()) {
                    let Ok(id) = raw_id.parse::<i64>() else {
                        notices.push(Notice::error(format!(
                            "Eroare: Valoarea '{raw_id}' nu este un ID valid."
                        )));
                        continue;
                    };
                    if !query.dubluri && seen.contains(&id) {
                        continue;
                    }
                    match records.iter().find(|a| i64::try_from(a.id) == Ok(id)) {
                        Some(access) => {
                            picked.push(access.clone());
                            seen.push(id);
                        }
                        None => notices.push(Notice::error(format!(
                            "Eroare: Accesarea cu ID-ul {id} nu există."
                        ))),
                    }
                }
            }
            selection = picked;
        }

        let table = match &query.tabel {
            None => None,
            Some(spec) => {
                let columns = Column::parse_list(spec);
                if columns.is_empty() {
                    notices.push(Notice::warning(
                        "Nicio coloană validă nu a fost specificată pentru tabel.".to_string(),
                    ));
                    None
                } else {
                    let rows = selection
                        .iter()
                        .map(|a| columns.iter().map(|c| c.value(a)).collect())
                        .collect();
                    Some(Table { columns, rows })
                }
            }
        };

        Self {
            total,
            current_id,
            show_count: query.accesari.as_deref() == Some("nr"),
            details: query.accesari.as_deref() == Some("detalii"),
            notices,
            selection,
            table,
            stats: PageStats::from_records(records),
            final_warning,
        }
    }
}
