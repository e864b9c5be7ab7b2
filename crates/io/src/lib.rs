//! # spei-io
//!
//! CSV persistence for the per-site tables of the SPEI workspace: the
//! forcing table read by the engine, the augmented table it writes, the
//! station climate table used for PET, and arbitrary acquisition tables.
//!
//! | Module | Description |
//! |--------|-------------|
//! | `forcing` | `time`/`pre`/`pet` table to [`DailySeries`](spei_core::DailySeries) |
//! | `spei_table` | Augmented table with `BAL_{k}` and `SPEI{k}_{site}` |
//! | `climate` | `tn`/`tx`/`tg`/`rr` station climate |
//! | `table` | Header-addressed CSV with `NA` missing values |
//! | `validate` | Accumulated validation errors |

mod climate;
mod error;
mod forcing;
mod spei_table;
mod table;
mod validate;

pub use climate::{ClimateTable, read_climate};
pub use error::IoError;
pub use forcing::{
    PET_COLUMN, PRECIPITATION_COLUMN, PreparedSeries, TIME_COLUMN, date_to_offset,
    default_epoch, offset_to_date, offsets_to_dates, prepare_series, read_forcing,
    write_forcing,
};
pub use spei_table::{DATE_COLUMN, has_column, parse_date, read_index, write_spei_table};
pub use table::{CsvTable, MISSING, format_value, parse_value};
