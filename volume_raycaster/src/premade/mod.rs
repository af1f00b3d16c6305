// Some prebuilt transfer functions
// for volumes used in development and by the generator.
// A user should build their own to satisfy their needs.

pub mod transfer_functions;

pub use transfer_functions::PrewrittenTF;
