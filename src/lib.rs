// Do this because numerics calls for a lot of non-standard names
#![allow(non_upper_case_globals)]
pub mod antenna;
pub mod aoa_error;
pub mod array_ext;
pub mod array_factor;
pub mod band;
pub mod comparison;
pub mod deformation;
pub mod error;
pub mod fit;
pub mod helper;
pub mod helper_traits;
pub mod phase;
pub mod scenario;
pub mod series_chart;
pub mod sweep;
pub mod table;
