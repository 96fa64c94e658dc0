mod account;
mod category;
mod course;
mod course_rating;
mod enrollment;
mod material;
mod progress_record;

pub use account::*;
pub use category::*;
pub use course::*;
pub use course_rating::*;
pub use enrollment::*;
pub use material::*;
pub use progress_record::*;
