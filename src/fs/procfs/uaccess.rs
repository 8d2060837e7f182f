//! Acesso ao buffer do chamador
//!
//! O buffer de uma escrita pertence ao espaço do usuário. O host entrega
//! algo que sabe copiá-lo (`copy_from_user`); o controlador nunca
//! desreferencia o buffer original.

use crate::sys::Errno;

/// Buffer de origem de uma escrita.
pub trait UserSlice {
    /// Tamanho declarado pelo chamador.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copia exatamente `dst.len()` bytes do início do buffer.
    fn copy_to(&self, dst: &mut [u8]) -> Result<(), Errno>;
}

/// Buffer já residente no kernel.
impl UserSlice for &[u8] {
    fn len(&self) -> usize {
        <[u8]>::len(self)
    }

    fn copy_to(&self, dst: &mut [u8]) -> Result<(), Errno> {
        let src = self.get(..dst.len()).ok_or(Errno::EFAULT)?;
        dst.copy_from_slice(src);
        Ok(())
    }
}
