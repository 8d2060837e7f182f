// =============================================================================
// KLOG SINK - ZERO OVERHEAD
// =============================================================================
//
// Destino dos bytes emitidos pelos macros de log (kinfo!, kerror!, ...).
//
// ARQUITETURA:
// O módulo roda dentro de um kernel hospedeiro que já possui seu próprio
// buffer de log (printk). Em vez de falar com uma porta serial, as funções
// abaixo repassam os bytes para um `LogSink` instalado uma única vez:
// - SEM Mutex - o sink é publicado via `spin::Once` e só lido depois
// - SEM core::fmt - números são convertidos à mão em buffer de pilha
// - SEM alocação - apenas strings e valores imediatos
//
// Enquanto nenhum sink for instalado, toda saída é descartada.
//
// FUNÇÕES DISPONÍVEIS:
// - emit_str(s)      : Envia string
// - emit_dec(v)      : Envia u64 em decimal
// - emit_hex(v)      : Envia u64 em hexadecimal (0x...)
// - emit_nl()        : Envia newline
//
// NOTA IMPORTANTE:
// Uma linha de log é composta por várias chamadas. Em SMP as linhas de
// CPUs diferentes podem se intercalar. Isso é aceitável para diagnóstico.
//
// =============================================================================

use spin::Once;

/// Destino final das mensagens de log (printk do kernel hospedeiro,
/// buffer de captura em testes, etc.).
pub trait LogSink: Sync {
    /// Recebe um fragmento de linha. Nunca contém newline parcial.
    fn write_str(&self, s: &str);
}

static SINK: Once<&'static dyn LogSink> = Once::new();

/// Instala o sink global. Apenas a primeira chamada tem efeito.
///
/// Retorna `false` se já existia um sink instalado.
pub fn install(sink: &'static dyn LogSink) -> bool {
    let mut installed = false;
    SINK.call_once(|| {
        installed = true;
        sink
    });
    installed
}

/// Indica se há um sink recebendo as mensagens.
pub fn is_installed() -> bool {
    SINK.get().is_some()
}

// =============================================================================
// FUNÇÕES DE ESCRITA - CORE
// =============================================================================

/// Envia uma string para o sink.
#[inline(never)]
pub fn emit_str(s: &str) {
    if let Some(sink) = SINK.get() {
        sink.write_str(s);
    }
}

/// Envia newline.
#[inline]
pub fn emit_nl() {
    emit_str("\n");
}

/// Envia um valor em decimal.
///
/// u64::MAX tem 20 dígitos, então o buffer de pilha nunca transborda.
#[inline(never)]
pub fn emit_dec(value: u64) {
    let mut buf = [0u8; 20];
    emit_str(format_dec(value, &mut buf));
}

/// Envia um valor em hexadecimal com prefixo `0x`.
#[inline(never)]
pub fn emit_hex(value: u64) {
    let mut buf = [0u8; 18];
    emit_str(format_hex(value, &mut buf));
}

// =============================================================================
// CONVERSÃO NUMÉRICA (sem core::fmt)
// =============================================================================

fn format_dec(mut value: u64, buf: &mut [u8; 20]) -> &str {
    let mut pos = buf.len();
    loop {
        pos -= 1;
        buf[pos] = b'0' + (value % 10) as u8;
        value /= 10;
        if value == 0 {
            break;
        }
    }
    // SAFETY: apenas dígitos ASCII foram escritos
    unsafe { core::str::from_utf8_unchecked(&buf[pos..]) }
}

fn format_hex(mut value: u64, buf: &mut [u8; 18]) -> &str {
    const DIGITS: &[u8; 16] = b"0123456789abcdef";
    let mut pos = buf.len();
    loop {
        pos -= 1;
        buf[pos] = DIGITS[(value & 0xF) as usize];
        value >>= 4;
        if value == 0 {
            break;
        }
    }
    pos -= 1;
    buf[pos] = b'x';
    pos -= 1;
    buf[pos] = b'0';
    // SAFETY: apenas ASCII foi escrito
    unsafe { core::str::from_utf8_unchecked(&buf[pos..]) }
}
