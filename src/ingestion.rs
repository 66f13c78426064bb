use crate::error::{FlowTreeError, Result};
use crate::schema::LedgerRecord;
use std::fs::File;
use std::io::Read;
use std::path::Path;

const REQUIRED_COLUMNS: [&str; 3] = ["ministry", "account_name", "amount_dollars"];
const OPTIONAL_COLUMNS: [&str; 5] = [
    "program",
    "activity",
    "sub_item",
    "account_detail",
    "expenditure_category",
];

struct ColumnMap {
    ministry: usize,
    account_name: usize,
    amount: usize,
    program: Option<usize>,
    activity: Option<usize>,
    sub_item: Option<usize>,
    account_detail: Option<usize>,
    expenditure: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));

        let required = |name: &str| {
            find(name).ok_or_else(|| FlowTreeError::Schema {
                line: 1,
                details: format!(
                    "missing required column '{}' (required: {}, optional: {})",
                    name,
                    REQUIRED_COLUMNS.join(", "),
                    OPTIONAL_COLUMNS.join(", ")
                ),
            })
        };

        Ok(Self {
            ministry: required("ministry")?,
            account_name: required("account_name")?,
            amount: required("amount_dollars")?,
            program: find("program"),
            activity: find("activity"),
            sub_item: find("sub_item"),
            account_detail: find("account_detail"),
            expenditure: find("expenditure_category"),
        })
    }
}

fn non_blank(row: &csv::StringRecord, idx: Option<usize>) -> Option<String> {
    idx.and_then(|i| row.get(i))
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Reads a normalized ledger export into records. Blank optional cells become
/// absent values, never empty-string grouping keys; a missing required cell
/// or an unparseable amount rejects the row with its line number, before the
/// aggregation pipeline ever sees it.
pub fn read_ledger_csv<R: Read>(reader: R) -> Result<Vec<LedgerRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns = ColumnMap::from_headers(rdr.headers()?)?;

    let mut records = Vec::new();
    for row in rdr.records() {
        let row = row?;
        let line = row.position().map(|p| p.line()).unwrap_or(0);

        let ministry = non_blank(&row, Some(columns.ministry)).ok_or_else(|| {
            FlowTreeError::Schema {
                line,
                details: "blank ministry".to_string(),
            }
        })?;
        let account_name = non_blank(&row, Some(columns.account_name)).ok_or_else(|| {
            FlowTreeError::Schema {
                line,
                details: "blank account_name".to_string(),
            }
        })?;
        let raw_amount = row.get(columns.amount).unwrap_or("").trim();
        let amount: f64 = raw_amount.parse().map_err(|_| FlowTreeError::Schema {
            line,
            details: format!("unparseable amount_dollars '{raw_amount}'"),
        })?;

        let mut organization_path = vec![ministry];
        if let Some(program) = non_blank(&row, columns.program) {
            organization_path.push(program);
        }

        records.push(LedgerRecord {
            organization_path,
            activity: non_blank(&row, columns.activity),
            sub_item: non_blank(&row, columns.sub_item),
            account_name,
            account_detail: non_blank(&row, columns.account_detail),
            expenditure: non_blank(&row, columns.expenditure),
            amount,
        });
    }

    Ok(records)
}

/// Convenience wrapper opening a ledger export from disk.
pub fn read_ledger_file(path: impl AsRef<Path>) -> Result<Vec<LedgerRecord>> {
    read_ledger_csv(File::open(path)?)
}
