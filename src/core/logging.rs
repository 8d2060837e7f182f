// =============================================================================
// MODULE LOGGING SYSTEM - ZERO OVERHEAD
// =============================================================================
//
// Sistema de logging do oppctl com custo ZERO quando desligado.
//
// ARQUITETURA:
// - Usa features do Cargo para compile-time filtering
// - Com feature "no_logs", TODOS os macros viram expressões vazias
// - SEM core::fmt - números são emitidos por `drivers::klog`
// - SEM alocação - Apenas strings e valores imediatos
// - Escreve APENAS no sink instalado (printk do kernel hospedeiro)
//
// NÍVEIS DE LOG (do mais crítico ao menos):
// - ERROR: Falhas de bind/lookup, ativação abortada
// - WARN:  Retornos de plataforma ignorados, restauração incompleta
// - INFO:  Fluxo normal (ativação, nova frequência máxima, despedida)
// - DEBUG: Decisões do sequenciador (direção, clamp, escala pulada)
// - TRACE: Cada chamada de rotina da plataforma
//
// FEATURES:
// - no_logs:   Remove 100% dos logs
// - log_error: ERROR e WARN
// - log_info:  + INFO
// - log_debug: + DEBUG (padrão)
// - log_trace: Todos os níveis
//
// COMO USAR:
//   kinfo!("(Dvfs) Ativando...");              // Apenas string
//   kinfo!("(Dvfs) Rate=", rate);              // String + decimal
//   kerror!("(Bind) Ausente: "; name);         // String + string
//   klog!("Rate=", rate, " Volt=", volt);      // Múltiplos valores
//
// =============================================================================

pub const P_ERROR: &str = "oppctl: [ERRO] ";
pub const P_WARN: &str = "oppctl: [WARN] ";
pub const P_INFO: &str = "oppctl: [INFO] ";
pub const P_DEBUG: &str = "oppctl: [DEBG] ";
pub const P_TRACE: &str = "oppctl: [TRAC] ";

/// Corpo comum a todos os macros de nível.
#[doc(hidden)]
#[macro_export]
macro_rules! __klog_line {
    ($prefix:expr, $msg:expr) => {{
        $crate::drivers::klog::emit_str($prefix);
        $crate::drivers::klog::emit_str($msg);
        $crate::drivers::klog::emit_nl();
    }};
    ($prefix:expr, $msg:expr; $s:expr) => {{
        $crate::drivers::klog::emit_str($prefix);
        $crate::drivers::klog::emit_str($msg);
        $crate::drivers::klog::emit_str($s);
        $crate::drivers::klog::emit_nl();
    }};
    ($prefix:expr, $msg:expr, $val:expr) => {{
        $crate::drivers::klog::emit_str($prefix);
        $crate::drivers::klog::emit_str($msg);
        $crate::drivers::klog::emit_dec($val as u64);
        $crate::drivers::klog::emit_nl();
    }};
    ($prefix:expr, $msg:expr, $val:expr, $msg2:expr) => {{
        $crate::drivers::klog::emit_str($prefix);
        $crate::drivers::klog::emit_str($msg);
        $crate::drivers::klog::emit_dec($val as u64);
        $crate::drivers::klog::emit_str($msg2);
        $crate::drivers::klog::emit_nl();
    }};
}

// =============================================================================
// MACROS DE LOG - NÍVEL ERROR / WARN
// =============================================================================

#[cfg(not(feature = "no_logs"))]
#[macro_export]
macro_rules! kerror {
    ($($t:tt)*) => {
        $crate::__klog_line!($crate::core::logging::P_ERROR, $($t)*)
    };
}

#[cfg(feature = "no_logs")]
#[macro_export]
macro_rules! kerror {
    ($($t:tt)*) => {{}};
}

#[cfg(not(feature = "no_logs"))]
#[macro_export]
macro_rules! kwarn {
    ($($t:tt)*) => {
        $crate::__klog_line!($crate::core::logging::P_WARN, $($t)*)
    };
}

#[cfg(feature = "no_logs")]
#[macro_export]
macro_rules! kwarn {
    ($($t:tt)*) => {{}};
}

// =============================================================================
// MACROS DE LOG - NÍVEL INFO
// =============================================================================

#[cfg(any(
    feature = "log_info",
    feature = "log_debug",
    feature = "log_trace"
))]
#[macro_export]
macro_rules! kinfo {
    ($($t:tt)*) => {
        $crate::__klog_line!($crate::core::logging::P_INFO, $($t)*)
    };
}

#[cfg(not(any(
    feature = "log_info",
    feature = "log_debug",
    feature = "log_trace"
)))]
#[macro_export]
macro_rules! kinfo {
    ($($t:tt)*) => {{}};
}

// =============================================================================
// MACROS DE LOG - NÍVEL DEBUG
// =============================================================================

#[cfg(any(feature = "log_debug", feature = "log_trace"))]
#[macro_export]
macro_rules! kdebug {
    ($($t:tt)*) => {
        $crate::__klog_line!($crate::core::logging::P_DEBUG, $($t)*)
    };
}

#[cfg(not(any(feature = "log_debug", feature = "log_trace")))]
#[macro_export]
macro_rules! kdebug {
    ($($t:tt)*) => {{}};
}

// =============================================================================
// MACROS DE LOG - NÍVEL TRACE
// =============================================================================

#[cfg(feature = "log_trace")]
#[macro_export]
macro_rules! ktrace {
    ($($t:tt)*) => {
        $crate::__klog_line!($crate::core::logging::P_TRACE, $($t)*)
    };
}

#[cfg(not(feature = "log_trace"))]
#[macro_export]
macro_rules! ktrace {
    ($($t:tt)*) => {{}};
}

// =============================================================================
// MACROS AUXILIARES
// =============================================================================

/// klog! - Log genérico sem prefixo de nível e sem newline.
///
/// Útil para montar linhas com vários valores (o dump de ativação).
#[cfg(not(feature = "no_logs"))]
#[macro_export]
macro_rules! klog {
    ($msg:expr) => {{
        $crate::drivers::klog::emit_str($msg);
    }};
    ($msg:expr, $val:expr) => {{
        $crate::drivers::klog::emit_str($msg);
        $crate::drivers::klog::emit_dec($val as u64);
    }};
    ($msg1:expr, $val:expr, $msg2:expr) => {{
        $crate::drivers::klog::emit_str($msg1);
        $crate::drivers::klog::emit_dec($val as u64);
        $crate::drivers::klog::emit_str($msg2);
    }};
    ($msg1:expr, $val1:expr, $msg2:expr, $val2:expr) => {{
        $crate::drivers::klog::emit_str($msg1);
        $crate::drivers::klog::emit_dec($val1 as u64);
        $crate::drivers::klog::emit_str($msg2);
        $crate::drivers::klog::emit_dec($val2 as u64);
    }};
}

#[cfg(feature = "no_logs")]
#[macro_export]
macro_rules! klog {
    ($($t:tt)*) => {{}};
}

/// knl! - Emite apenas newline.
#[cfg(not(feature = "no_logs"))]
#[macro_export]
macro_rules! knl {
    () => {{
        $crate::drivers::klog::emit_nl();
    }};
}

#[cfg(feature = "no_logs")]
#[macro_export]
macro_rules! knl {
    () => {{}};
}

// =============================================================================
// MACROS DE STATUS (OK/FAIL)
// =============================================================================

/// kok! - Log de sucesso.
#[cfg(not(feature = "no_logs"))]
#[macro_export]
macro_rules! kok {
    ($msg:expr) => {{
        $crate::drivers::klog::emit_str("oppctl: [OK] ");
        $crate::drivers::klog::emit_str($msg);
        $crate::drivers::klog::emit_nl();
    }};
}

#[cfg(feature = "no_logs")]
#[macro_export]
macro_rules! kok {
    ($($t:tt)*) => {{}};
}

/// kfail! - Log de falha.
#[cfg(not(feature = "no_logs"))]
#[macro_export]
macro_rules! kfail {
    ($msg:expr) => {{
        $crate::drivers::klog::emit_str("oppctl: [FAIL] ");
        $crate::drivers::klog::emit_str($msg);
        $crate::drivers::klog::emit_nl();
    }};
}

#[cfg(feature = "no_logs")]
#[macro_export]
macro_rules! kfail {
    ($($t:tt)*) => {{}};
}
