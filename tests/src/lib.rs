//! orgtree Tests
//!
//! Scenario harness for end-to-end tests. A scenario is a list of named
//! steps run against one session; each step carries its own assertion.
//! Nodes are addressed by label so steps never depend on allocated ids.
//!
//! ```ignore
//! Scenario::new("promote")
//!     .step("acme", Op::create("acme", None, "Acme"), |a| a.created(1))
//!     .step("sales", Op::create("sales", Some("acme"), "Sales"), |a| a.path("sales", "Acme/Sales"))
//!     .step("promote", Op::move_to("sales", None), |a| a.level("sales", 0))
//!     .run()
//!     .unwrap();
//! ```

mod assertion;
mod scenario;

pub use assertion::{Assertion, AssertionBuilder};
pub use error::{ScenarioError, ScenarioResult};
pub use scenario::{Labels, Op, Scenario, Step};

pub mod prelude {
    pub use crate::assertion::{Assertion, AssertionBuilder};
    pub use crate::error::{ScenarioError, ScenarioResult};
    pub use crate::scenario::{Labels, Op, Scenario, Step};
    pub use orgtree_access::CapabilitySet;
}
