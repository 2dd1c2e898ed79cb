pub use anyhow::{anyhow, bail, ensure, Error, Result};
