mod court;
mod court_list;
mod editor;
mod extras;
mod schedule;
mod sport;
mod validation;

pub use court::{Court, CourtId, CourtPayload, CourtStatus, Photo};
pub use court_list::{CourtList, CourtListError};
pub use editor::{CourtEditor, DEFAULT_BASE_PRICE, EditorError, Field, FieldError};
pub use extras::{
    AddOn, RACKET_ADD_ON, RACKET_DEFAULT_PRICE, RecurringBooking, SpecialPrice, next_id,
    starter_add_ons,
};
pub use schedule::{FIRST_SLOT_HOUR, SLOT_COUNT, TimeSlot, Weekday, WeeklyAvailability};
pub use sport::SportType;
pub use validation::{
    MAX_PHOTOS, MIN_NAME_LEN, ValidationError, format_price, parse_price, validate_base_price,
    validate_name, validate_photo_count,
};
