pub mod config;
pub mod controller;
pub mod feed;
pub mod filter;
pub mod logging;
pub mod markup;
pub mod mvi;
pub mod page;
pub mod runtime;
pub mod shell;
pub mod transport;
