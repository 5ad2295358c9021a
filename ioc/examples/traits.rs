//! Registering a service against a trait and injecting it into a consumer.

use std::sync::Arc;
use truss_ioc::{resolve, Container, Inject, ResolveError};

// 1. Define the abstraction (the trait)
trait Logger: Send + Sync {
  fn log(&self, message: &str);
}

// 2. Define a concrete implementation
struct ConsoleLogger;
impl Logger for ConsoleLogger {
  fn log(&self, message: &str) {
    println!("[console] {message}");
  }
}

// 3. Define a service that depends on the abstraction
struct ReportService {
  logger: Arc<dyn Logger>,
}

impl Inject for ReportService {
  fn inject(ioc: &Container) -> Result<Self, ResolveError> {
    Ok(Self {
      logger: ioc.resolve()?,
    })
  }
}

impl ReportService {
  fn generate(&self) {
    self.logger.log("starting report generation");
    self.logger.log("finished report generation");
  }
}

fn main() {
  let ioc = Container::new();

  // ReportService never creates its logger; the container injects whichever
  // implementation is registered for the trait.
  ioc
    .register_single_instance_trait::<dyn Logger>(|_| Ok(Arc::new(ConsoleLogger)))
    .unwrap();
  ioc.register_single_instance::<ReportService>().unwrap();

  let report = resolve!(ioc, ReportService);
  report.generate();
}
