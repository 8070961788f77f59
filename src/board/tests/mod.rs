//! Unit tests for the board domain, adapters, and services.
