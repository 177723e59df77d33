//! Repository layout checks run alongside the test suite
