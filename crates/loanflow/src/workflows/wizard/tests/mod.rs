mod common;
mod snapshot;
