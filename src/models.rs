pub mod coordinate;
pub mod leg;
pub mod token;

pub use coordinate::Coordinate;
pub use leg::Leg;
pub use token::Token;
