//! Round-trip formatters between the backend's flat strings and the
//! structured values the editors work with. Every `parse_*` is total.

pub mod date_range;
pub mod degree;
pub mod escape;
pub mod gpa;
pub mod list;
pub mod phone;

pub use date_range::{format_date_range, parse_date_range, DateRange, PRESENT};
pub use degree::{format_degree, parse_degree, Degree, DEGREE_MAX_LEN};
pub use escape::{escape, unescape};
pub use gpa::{format_gpa, parse_gpa, Centi, Gpa};
pub use list::{format_list, parse_list};
pub use phone::{format_phone, parse_phone, Phone};
