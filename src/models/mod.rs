pub mod adjustment;
pub mod clock_event;
pub mod day_record;
pub mod event_kind;
pub mod legacy_point;
pub mod location;
