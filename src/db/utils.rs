//! Database utility functions.

use chrono::{DateTime, SubsecRound, Utc};

/// Current time at second precision, the resolution stored for timestamps.
pub fn current_timestamp() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn current_timestamp_has_no_subseconds() {
        assert_eq!(current_timestamp().nanosecond(), 0);
    }
}
