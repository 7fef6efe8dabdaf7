#[cfg(feature = "serde")]
mod serde_tests {
    use dbits::DynamicBits;
    use proptest::prelude::*;

    #[test]
    fn serializes_as_bit_string() {
        let bits: DynamicBits = DynamicBits::from_bools([true, false, true, true, false]);
        let serialized = serde_json::to_string(&bits).expect("Failed to serialize DynamicBits");
        assert_eq!(serialized, "\"10110\"");
    }

    #[test]
    fn rejects_non_bit_chars() {
        let result: Result<DynamicBits, _> = serde_json::from_str("\"10#\"");
        assert!(result.is_err());
    }

    proptest! {
        #[test]
        fn dynamic_bits_serde_roundtrip(bits in prop::collection::vec(any::<bool>(), 0..300)) {
            let original: DynamicBits<2> = DynamicBits::from_bools(bits);
            let serialized = serde_json::to_string(&original).expect("Failed to serialize DynamicBits");
            let deserialized: DynamicBits<2> = serde_json::from_str(&serialized).expect("Failed to deserialize DynamicBits");
            assert_eq!(original, deserialized);
        }
    }
}
