fn main() {
    // The swap invariant check relies on arithmetic overflow being fatal.
    // Debug builds enable overflow checks by default; release builds must set
    // `overflow-checks = true` in the workspace [profile.release].
    match std::panic::catch_unwind(|| {
        #[allow(arithmetic_overflow)]
        let _ = 255_u8 + 1;
    }) {
        Ok(_) => {
            panic!("overflow checks are required for the program to function correctly");
        }
        Err(_) => {
            // Overflow checks are enabled - good!
        }
    }
}
