//! Mapping the extracted grid onto departure rows.

use tracing::warn;

use crate::domain::{DepartureRow, TrainId, parse_clock_time};

use super::error::TableFormatError;
use super::extract::Table;

/// Header positions of the columns we read. `None` means not found.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Columns {
    dep: Option<usize>,
    to: Option<usize>,
    trk: Option<usize>,
    line: Option<usize>,
    train: Option<usize>,
    status: Option<usize>,
}

impl Columns {
    /// Locate columns by exact header text.
    fn locate(header: &[String]) -> Self {
        let mut columns = Self::default();
        for (i, name) in header.iter().enumerate() {
            let slot = match name.as_str() {
                "DEP" => &mut columns.dep,
                "TO" => &mut columns.to,
                "TRK" => &mut columns.trk,
                "LINE" => &mut columns.line,
                "TRAIN" => &mut columns.train,
                "STATUS" => &mut columns.status,
                _ => continue,
            };
            *slot = Some(i);
        }
        columns
    }

    fn any_found(&self) -> bool {
        [
            self.dep,
            self.to,
            self.trk,
            self.line,
            self.train,
            self.status,
        ]
        .iter()
        .any(Option::is_some)
    }
}

/// Bring a data row to the header's width.
///
/// The page omits the track cell before a track is assigned, so a row one
/// cell short gets an empty track spliced in. Any other mismatch is
/// unrecoverable.
fn align_row(row: &[String], width: usize, trk: Option<usize>) -> Option<Vec<String>> {
    if row.len() == width {
        return Some(row.to_vec());
    }

    let trk = trk?;
    if row.len() + 1 != width || trk > row.len() {
        return None;
    }

    let mut aligned = row.to_vec();
    aligned.insert(trk, String::new());
    Some(aligned)
}

fn cell(row: &[String], column: Option<usize>) -> &str {
    column
        .and_then(|i| row.get(i))
        .map_or("", String::as_str)
}

/// Map an extracted departure table onto [`DepartureRow`]s.
///
/// Row 0 is the header. Rows with a non-numeric train number (Amtrak) are
/// skipped; an unreadable departure time is logged and left empty.
pub fn map_departures(table: &Table) -> Result<Vec<DepartureRow>, TableFormatError> {
    let (header, rows) = table.split_first().ok_or(TableFormatError::Empty)?;

    let columns = Columns::locate(header);
    if !columns.any_found() {
        return Err(TableFormatError::NoColumns);
    }

    let mut departures = Vec::with_capacity(rows.len());
    for (i, raw) in rows.iter().enumerate() {
        let Some(row) = align_row(raw, header.len(), columns.trk) else {
            warn!(
                row = i + 1,
                cells = raw.len(),
                expected = header.len(),
                "skipping departure row with missing cells"
            );
            continue;
        };

        let train = cell(&row, columns.train);
        let train_id = if train.is_empty() {
            None
        } else {
            match train.parse::<TrainId>() {
                Ok(id) => Some(id),
                Err(e) => {
                    warn!(row = i + 1, error = %e, "skipping departure row");
                    continue;
                }
            }
        };

        let dep = cell(&row, columns.dep);
        let scheduled_time = if dep.is_empty() {
            None
        } else {
            parse_clock_time(dep)
                .inspect_err(|e| warn!(row = i + 1, error = %e, "unreadable departure time"))
                .ok()
        };

        departures.push(DepartureRow {
            train_id,
            scheduled_time,
            destination: cell(&row, columns.to).to_string(),
            track: cell(&row, columns.trk).to_string(),
            line: cell(&row, columns.line).to_string(),
            status: cell(&row, columns.status).to_string(),
        });
    }

    Ok(departures)
}
