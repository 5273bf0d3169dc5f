//! Workspace tooling package. It carries the pre-commit hook configuration
//! and no code of its own.
