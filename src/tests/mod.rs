//! Scenario tests spanning several modules.
