// SPDX-License-Identifier: Apache-2.0

//! Compile-time configuration validation
//!
//! Exactly one integer width feature must be enabled; it selects the type
//! `Integer::as_int()` parses into.

#[cfg(not(any(feature = "int32", feature = "int64")))]
compile_error!("No integer width features selected: choose one of 'int32' or 'int64'");

#[cfg(all(feature = "int32", feature = "int64"))]
compile_error!(
    "Cannot enable both 'int32' and 'int64' features simultaneously: choose one integer width"
);
