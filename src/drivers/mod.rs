//! Drivers
//!
//! Único "driver" próprio do módulo: o sink de log. Todo o resto do hardware
//! é acessado pelas rotinas da plataforma resolvidas em `hal`.

pub mod klog;
