#![no_main]
use dbits::DynamicBits;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (Vec<bool>, Vec<bool>, i16)| {
    let (left, right, amount) = data;

    let a: DynamicBits<2> = DynamicBits::from_bools(left.iter().copied());
    let b: DynamicBits<1> = DynamicBits::from_bools(right.iter().copied());

    assert_eq!(a.popcount(), left.iter().filter(|&&bit| bit).count());
    assert_eq!(!!a.clone(), a);

    // Shifts against a Vec<bool> model
    let len = left.len() as i64;
    let shifted = &a << amount;
    assert_eq!(shifted.len(), left.len());
    for i in 0..len {
        let source = i + amount as i64;
        let expected = (0..len).contains(&source) && left[source as usize];
        assert_eq!(shifted.get_bit(i as usize), expected, "i={i} amount={amount}");
    }
    assert_eq!(shifted.popcount(), shifted.iter().filter(|&bit| bit).count());

    // Mixed-length, mixed-capacity algebra
    let and = &a & &b;
    let or = &a | &b;
    let xor = &a ^ &b;
    assert_eq!(and.len(), left.len().max(right.len()));
    assert_eq!(and, &b & &a);
    assert_eq!(or, &b | &a);
    assert_eq!(xor, &b ^ &a);
    if left.len() == right.len() {
        for i in 0..left.len() {
            assert_eq!(and.get_bit(i), left[i] && right[i]);
            assert_eq!(or.get_bit(i), left[i] || right[i]);
            assert_eq!(xor.get_bit(i), left[i] ^ right[i]);
        }
    }

    let decoded = DynamicBits::<1>::from_bytes(&xor.to_bytes()).expect("round trip");
    assert_eq!(decoded, xor);
});
