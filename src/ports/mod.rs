/// Ports module defining interfaces for hexagonal architecture
///
/// The application core talks to the dependency resolver, the persisted
/// results, and the console only through the outbound ports defined here.
pub mod outbound;
