//! Step definitions for tag assignment scenarios.


mod given;
mod then;
mod when;
