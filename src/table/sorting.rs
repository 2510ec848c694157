use crate::error::TaskboardError;
use serde_json::Value;
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Sort order direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Dsc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Dsc,
            Self::Dsc => Self::Asc,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => write!(f, "asc"),
            Self::Dsc => write!(f, "dsc"),
        }
    }
}

impl FromStr for SortDirection {
    type Err = TaskboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "dsc" | "desc" => Ok(Self::Dsc),
            _ => Err(TaskboardError::InvalidSortDirection(s.to_string())),
        }
    }
}

/// Which column a table is sorted by, and in which direction
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
    pub column: Option<String>,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(column: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            column: Some(column.into()),
            direction,
        }
    }

    /// Header click: the same column flips asc/dsc, a new column starts asc
    pub fn click(&mut self, column: &str) {
        self.direction = if self.column.as_deref() == Some(column) {
            self.direction.toggled()
        } else {
            SortDirection::Asc
        };
        self.column = Some(column.to_string());
    }
}

/// Sorts records in place by the state's column.
///
/// The sort is stable, so records with equal keys keep their original
/// order. Without a sort column the order is untouched. Records missing
/// the key (or holding `null`) always sort to the end, in either direction.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use taskboard_core::table::sorting::{sort_records, SortDirection, SortState};
///
/// let mut rows = vec![json!({"n": 3}), json!({"n": 1}), json!({"n": 2})];
/// sort_records(&mut rows, &SortState::new("n", SortDirection::Asc));
/// assert_eq!(rows[0]["n"], 1);
/// ```
pub fn sort_records<R: Borrow<Value>>(records: &mut [R], state: &SortState) {
    let Some(column) = state.column.as_deref() else {
        return;
    };

    records.sort_by(|a, b| {
        let (a, b): (&Value, &Value) = (a.borrow(), b.borrow());
        match (present(a.get(column)), present(b.get(column))) {
            (Some(x), Some(y)) => {
                let cmp = compare_values(x, y);
                match state.direction {
                    SortDirection::Asc => cmp,
                    SortDirection::Dsc => cmp.reverse(),
                }
            }
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    });
}

fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

/// Rank used when two fields hold different JSON types
fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Number(_) => 0,
        Value::String(_) => 1,
        Value::Bool(_) => 2,
        Value::Array(_) => 3,
        Value::Object(_) => 4,
        Value::Null => 5,
    }
}

/// Total order over two present record fields.
///
/// Values of different types order by type (numbers, strings, booleans,
/// then arrays and objects). Within a type, numbers compare numerically,
/// strings lexicographically and booleans with false first. Arrays and
/// objects are all equal to each other.
fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            let x = x.as_f64().unwrap_or_default();
            let y = y.as_f64().unwrap_or_default();
            x.total_cmp(&y)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}
