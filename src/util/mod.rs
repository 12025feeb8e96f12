//! Utility modules for xmlaccess.

pub mod qname;
