/// RNG интерфейс для генерации кодов комнат.
pub trait RandomSource {
    /// Случайный индекс в 0..upper (upper > 0).
    fn next_index(&mut self, upper: usize) -> usize;
}

//
// ✅ NATIVE ВАРИАНТ (НЕ wasm32):
//    тут есть rand.
//
#[cfg(not(target_arch = "wasm32"))]
#[derive(Clone, Debug, Default)]
pub struct SystemRng;

#[cfg(not(target_arch = "wasm32"))]
impl RandomSource for SystemRng {
    fn next_index(&mut self, upper: usize) -> usize {
        use rand::Rng;

        rand::thread_rng().gen_range(0..upper)
    }
}

/// Детерминированный RNG для тестов и реплея.
/// Одинаковый seed → одинаковая последовательность кодов комнат.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Clone, Debug)]
pub struct DeterministicRng {
    inner: rand::rngs::StdRng,
}

#[cfg(not(target_arch = "wasm32"))]
impl DeterministicRng {
    pub fn from_u64(seed: u64) -> Self {
        use rand::SeedableRng;
        Self {
            inner: rand::rngs::StdRng::seed_from_u64(seed),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl RandomSource for DeterministicRng {
    fn next_index(&mut self, upper: usize) -> usize {
        use rand::Rng;
        self.inner.gen_range(0..upper)
    }
}

//
// ✅ WASM ВАРИАНТ (Linera контракт):
//    тут НЕТ rand / getrandom / wasm-bindgen.
//
#[cfg(target_arch = "wasm32")]
#[derive(Clone, Debug, Default)]
pub struct SystemRng {
    state: u64,
}

#[cfg(target_arch = "wasm32")]
impl RandomSource for SystemRng {
    fn next_index(&mut self, upper: usize) -> usize {
        // splitmix64: контракт детерминированный, криптостойкость кодам комнат не нужна.
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^= z >> 31;
        (z % upper as u64) as usize
    }
}
