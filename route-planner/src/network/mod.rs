//! Rail network model.
//!
//! Lines, their ordered stations and the interchanges joining them. A
//! [`RailNetwork`] is immutable once built and is shared by reference with
//! every consumer.

mod error;
pub mod hong_kong;
mod model;

pub use error::NetworkError;
pub use model::{
    Hops, Interchange, Line, RailNetwork, RailNetworkBuilder, StationInfo, Terminal,
    stations_between,
};
