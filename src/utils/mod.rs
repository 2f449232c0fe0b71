pub mod input;
pub mod io;
pub mod plot;
pub mod table;
