//! Host-specific services
//!
//! Each host provides a zone source backed by whatever it knows about local
//! time. Only the desktop implementation exists today.

pub mod linux;
