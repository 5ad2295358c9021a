//! Two services that depend on each other, with the cycle broken by a
//! deferred handle on one side.

use std::sync::Arc;
use truss_ioc::{Container, Lazy};

trait Reporter: Send + Sync {
  fn run(&self);
  fn describe(&self) -> String;
}

trait Formatter: Send + Sync {
  fn emit(&self);
}

struct ReporterImpl {
  formatter: Arc<dyn Formatter>,
}

impl Reporter for ReporterImpl {
  fn run(&self) {
    self.formatter.emit();
  }

  fn describe(&self) -> String {
    "the reporter service".to_string()
  }
}

struct FormatterImpl {
  // Taking the reporter eagerly here would recurse: the reporter is built
  // first and needs a formatter to exist. The handle postpones the lookup
  // until `emit` actually runs.
  reporter: Lazy<dyn Reporter>,
}

impl Formatter for FormatterImpl {
  fn emit(&self) {
    let reporter = self.reporter.value().expect("reporter is registered");
    println!("formatting output of {}", reporter.describe());
  }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
  let ioc = Container::new();

  ioc.register_single_instance_trait::<dyn Reporter>(|ioc| {
    Ok(Arc::new(ReporterImpl {
      formatter: ioc.resolve()?,
    }))
  })?;
  ioc.register_single_instance_trait::<dyn Formatter>(|ioc| {
    Ok(Arc::new(FormatterImpl {
      reporter: ioc.resolve_deferred()?,
    }))
  })?;

  let reporter = ioc.resolve::<dyn Reporter>()?;
  reporter.run();

  Ok(())
}
