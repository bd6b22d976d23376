//! Scenario tests that drive the whole simulation loop

mod pickup_throw;
