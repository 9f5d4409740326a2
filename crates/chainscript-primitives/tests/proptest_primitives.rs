use proptest::prelude::*;

use chainscript_primitives::hash::{hash160, ripemd160, sha256, HASH160_LEN};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn hash160_is_ripemd_of_sha256(data in prop::collection::vec(any::<u8>(), 0..256)) {
        let digest = hash160(&data);
        prop_assert_eq!(digest.len(), HASH160_LEN);
        prop_assert_eq!(digest, ripemd160(&sha256(&data)));
    }

    #[test]
    fn hash160_distinguishes_appended_byte(
        data in prop::collection::vec(any::<u8>(), 0..128),
        extra in any::<u8>()
    ) {
        let mut longer = data.clone();
        longer.push(extra);
        prop_assert_ne!(hash160(&data), hash160(&longer));
    }
}
