use tracing::debug;

use crate::roster::Participant;

/// How far down a sheet the header row may appear.
const HEADER_SEARCH_ROWS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Handler,
    Dog,
    Registration,
    JumpHeight,
    Division,
}

/// Column index of each known field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct ColumnMap {
    handler: Option<usize>,
    dog: Option<usize>,
    registration: Option<usize>,
    jump_height: Option<usize>,
    division: Option<usize>,
}

impl ColumnMap {
    fn positional(offset: usize) -> Self {
        Self {
            handler: Some(offset),
            dog: Some(offset + 1),
            registration: Some(offset + 2),
            jump_height: Some(offset + 3),
            division: Some(offset + 4),
        }
    }

    fn set(&mut self, field: Field, index: usize) {
        let slot = match field {
            Field::Handler => &mut self.handler,
            Field::Dog => &mut self.dog,
            Field::Registration => &mut self.registration,
            Field::JumpHeight => &mut self.jump_height,
            Field::Division => &mut self.division,
        };
        slot.get_or_insert(index);
    }

    fn has_team_columns(&self) -> bool {
        self.handler.is_some() && self.dog.is_some()
    }
}

fn normalize(cell: &str) -> String {
    cell.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

fn classify(cell: &str) -> Option<Field> {
    let name = normalize(cell);
    if name.is_empty() {
        return None;
    }
    if name.contains("handler") || name == "owner" {
        Some(Field::Handler)
    } else if name.contains("dog") || name == "canine" {
        Some(Field::Dog)
    } else if name == "utn" || name.starts_with("reg") {
        Some(Field::Registration)
    } else if name.contains("division") || name == "div" {
        Some(Field::Division)
    } else if name.contains("height") {
        Some(Field::JumpHeight)
    } else {
        None
    }
}

fn detect_header(rows: &[Vec<String>]) -> Option<(usize, ColumnMap)> {
    rows.iter()
        .take(HEADER_SEARCH_ROWS)
        .enumerate()
        .find_map(|(row_index, row)| {
            let mut map = ColumnMap::default();
            for (index, cell) in row.iter().enumerate() {
                if let Some(field) = classify(cell) {
                    map.set(field, index);
                }
            }
            map.has_team_columns().then_some((row_index, map))
        })
}

fn is_ordinal(cell: &str) -> bool {
    let cell = cell.trim().trim_end_matches('.');
    !cell.is_empty() && cell.chars().all(|c| c.is_ascii_digit())
}

/// Detect a leading numbering column in header-less data.
fn leading_order_column(rows: &[Vec<String>]) -> bool {
    let mut data_rows = rows
        .iter()
        .filter(|row| row.iter().any(|c| !c.trim().is_empty()))
        .peekable();
    data_rows.peek().is_some()
        && data_rows.all(|row| {
            row.len() >= 3
                && is_ordinal(&row[0])
                && row.get(1).is_some_and(|c| !is_ordinal(c))
        })
}

fn cell(row: &[String], index: Option<usize>) -> &str {
    index
        .and_then(|i| row.get(i))
        .map(|c| c.trim())
        .unwrap_or("")
}

/// Convert tabular rows into participants.
///
/// A header row is located by its column names; without one the columns
/// are read positionally as handler, dog, UTN, jump height, division,
/// skipping a leading numbering column if every row has one. Rows with
/// neither a handler nor a dog are dropped.
pub fn parse_rows(rows: &[Vec<String>]) -> Vec<Participant> {
    let (data, map) = match detect_header(rows) {
        Some((header_row, map)) => {
            debug!("Header found at row {}: {:?}", header_row, map);
            (&rows[header_row + 1..], map)
        }
        None => {
            let offset = usize::from(leading_order_column(rows));
            debug!("No header row, positional columns (offset {})", offset);
            (rows, ColumnMap::positional(offset))
        }
    };

    data.iter()
        .filter_map(|row| {
            let handler = cell(row, map.handler);
            let dog = cell(row, map.dog);
            if handler.is_empty() && dog.is_empty() {
                return None;
            }
            Some(
                Participant::new(handler, dog)
                    .with_registration(cell(row, map.registration))
                    .with_jump_height(cell(row, map.jump_height))
                    .with_height_division(cell(row, map.division)),
            )
        })
        .collect()
}
