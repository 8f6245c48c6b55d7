use crate::domain::{AppError, Table};

/// Port for a datasource connection able to run queries.
///
/// Implementations are produced by factories registered for their `type`
/// discriminator; this crate defines the seam and ships no drivers.
pub trait Connector {
    /// Name the datasource was looked up under.
    fn name(&self) -> &str;

    /// Establish the connection. Called once before the first query.
    fn connect(&mut self) -> Result<(), AppError>;

    /// Run a statement and collect the full result set.
    fn query(&mut self, statement: &str) -> Result<Table, AppError>;

    /// Release the connection. Failures here are logged, never fatal.
    fn disconnect(&mut self) -> Result<(), AppError>;
}
