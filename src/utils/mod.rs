pub(crate) mod date;
pub(crate) mod timezone;

pub(crate) use date::{add_days, format_range, monday_of, parse_date};
pub(crate) use timezone::Timezone;
