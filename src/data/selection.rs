use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Meridiem {
    Am,
    Pm,
}

impl fmt::Display for Meridiem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Meridiem::Am => write!(f, "AM"),
            Meridiem::Pm => write!(f, "PM"),
        }
    }
}

impl Meridiem {
    pub fn toggled(self) -> Meridiem {
        match self {
            Meridiem::Am => Meridiem::Pm,
            Meridiem::Pm => Meridiem::Am,
        }
    }
}

/// The mutable day/time choice. `hour`, `minute`, and `meridiem` always
/// hold values; `day` stays unset until the user picks a day in the
/// displayed month.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
    pub day: Option<u32>,
    pub hour: u32,
    pub minute: u32,
    pub meridiem: Meridiem,
}

impl Selection {
    pub fn new(hour: u32, minute: u32, meridiem: Meridiem) -> Self {
        Selection {
            day: None,
            hour: hour.clamp(1, 12),
            minute: minute.min(59),
            meridiem,
        }
    }

    /// Accepts 1..=12; out-of-domain values are ignored, not clamped.
    pub fn set_hour(&mut self, hour: u32) {
        if (1..=12).contains(&hour) {
            self.hour = hour;
        }
    }

    /// Accepts 0..=59; out-of-domain values are ignored, not clamped.
    pub fn set_minute(&mut self, minute: u32) {
        if minute <= 59 {
            self.minute = minute;
        }
    }

    pub fn set_meridiem(&mut self, meridiem: Meridiem) {
        self.meridiem = meridiem;
    }
}

impl Default for Selection {
    fn default() -> Self {
        Selection::new(12, 0, Meridiem::Am)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_starts_with_no_day() {
        let sel = Selection::new(10, 29, Meridiem::Am);
        assert_eq!(sel.day, None);
        assert_eq!(sel.hour, 10);
        assert_eq!(sel.minute, 29);
        assert_eq!(sel.meridiem, Meridiem::Am);
    }

    #[test]
    fn test_new_clamps_construction_values() {
        // Construction defaults come from config and are clamped once;
        // runtime setters reject instead.
        let sel = Selection::new(0, 99, Meridiem::Pm);
        assert_eq!(sel.hour, 1);
        assert_eq!(sel.minute, 59);
    }

    #[test]
    fn test_set_hour_accepts_domain() {
        let mut sel = Selection::default();
        sel.set_hour(1);
        assert_eq!(sel.hour, 1);
        sel.set_hour(12);
        assert_eq!(sel.hour, 12);
    }

    #[test]
    fn test_set_hour_rejects_out_of_domain() {
        let mut sel = Selection::new(10, 29, Meridiem::Am);
        sel.set_hour(13);
        assert_eq!(sel.hour, 10);
        sel.set_hour(0);
        assert_eq!(sel.hour, 10);
    }

    #[test]
    fn test_set_minute_accepts_domain() {
        let mut sel = Selection::default();
        sel.set_minute(0);
        assert_eq!(sel.minute, 0);
        sel.set_minute(59);
        assert_eq!(sel.minute, 59);
    }

    #[test]
    fn test_set_minute_rejects_out_of_domain() {
        let mut sel = Selection::new(10, 29, Meridiem::Am);
        sel.set_minute(60);
        assert_eq!(sel.minute, 29);
    }

    #[test]
    fn test_meridiem_toggled() {
        assert_eq!(Meridiem::Am.toggled(), Meridiem::Pm);
        assert_eq!(Meridiem::Pm.toggled(), Meridiem::Am);
    }

    #[test]
    fn test_meridiem_display() {
        assert_eq!(Meridiem::Am.to_string(), "AM");
        assert_eq!(Meridiem::Pm.to_string(), "PM");
    }

    #[test]
    fn test_meridiem_yaml_roundtrip() {
        let yaml = serde_norway::to_string(&Meridiem::Pm).unwrap();
        let parsed: Meridiem = serde_norway::from_str(&yaml).unwrap();
        assert_eq!(parsed, Meridiem::Pm);
        assert!(yaml.contains("PM"));
    }
}
