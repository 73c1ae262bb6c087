use crate::*;

use proptest::prelude::*;
use std::collections::BTreeSet;

const MAX_BITS: usize = 300;

#[derive(Debug, Clone)]
enum ListOp {
    Push(bool),
    Set(usize, bool),
    InsertRange(usize, usize, bool),
    RemoveRange(usize, usize),
    Fill(usize, usize, bool),
    ExtendWith(usize, bool),
    Truncate(usize),
    ShiftLeft(usize),
    ShiftRight(usize),
    Not,
}

fn arb_list_op() -> impl Strategy<Value = ListOp> {
    prop_oneof![
        any::<bool>().prop_map(ListOp::Push),
        (any::<usize>(), any::<bool>()).prop_map(|(i, v)| ListOp::Set(i, v)),
        (any::<usize>(), 0..48usize, any::<bool>())
            .prop_map(|(i, n, v)| ListOp::InsertRange(i, n, v)),
        (any::<usize>(), any::<usize>()).prop_map(|(i, n)| ListOp::RemoveRange(i, n)),
        (any::<usize>(), any::<usize>(), any::<bool>())
            .prop_map(|(i, n, v)| ListOp::Fill(i, n, v)),
        (0..64usize, any::<bool>()).prop_map(|(n, v)| ListOp::ExtendWith(n, v)),
        any::<usize>().prop_map(ListOp::Truncate),
        any::<usize>().prop_map(ListOp::ShiftLeft),
        any::<usize>().prop_map(ListOp::ShiftRight),
        Just(ListOp::Not),
    ]
}

/// Applies one operation to the list and to a `Vec<bool>` oracle, reducing
/// raw indices modulo the current length so every call is in range.
fn apply_list_op(list: &mut BitList, model: &mut Vec<bool>, op: &ListOp) {
    let len = model.len();
    match *op {
        ListOp::Push(v) => {
            list.push(v);
            model.push(v);
        }
        ListOp::Set(i, v) => {
            if len == 0 {
                assert!(list.set(i, v).is_err());
                return;
            }
            let i = i % len;
            list.set(i, v).unwrap();
            model[i] = v;
        }
        ListOp::InsertRange(i, n, v) => {
            let i = i % (len + 1);
            list.insert_range(i, n, v).unwrap();
            for k in 0..n {
                model.insert(i + k, v);
            }
        }
        ListOp::RemoveRange(i, n) => {
            let i = i % (len + 1);
            let n = n % (len - i + 1);
            list.remove_range(i, n).unwrap();
            model.drain(i..i + n);
        }
        ListOp::Fill(i, n, v) => {
            let i = i % (len + 1);
            let n = n % (len - i + 1);
            list.fill(i, n, v).unwrap();
            for slot in &mut model[i..i + n] {
                *slot = v;
            }
        }
        ListOp::ExtendWith(n, v) => {
            list.extend_with(n, v);
            model.extend(std::iter::repeat(v).take(n));
        }
        ListOp::Truncate(n) => {
            let n = n % (len + 1);
            list.truncate(n);
            model.truncate(n);
        }
        ListOp::ShiftLeft(k) => {
            list.shift_left(k);
            if len > 0 {
                model.rotate_right(k % len);
            }
        }
        ListOp::ShiftRight(k) => {
            list.shift_right(k);
            if len > 0 {
                model.rotate_left(k % len);
            }
        }
        ListOp::Not => {
            list.not();
            for bit in model.iter_mut() {
                *bit = !*bit;
            }
        }
    }
}

fn paired_bits() -> impl Strategy<Value = (Vec<bool>, Vec<bool>)> {
    (0..MAX_BITS).prop_flat_map(|n| {
        (
            prop::collection::vec(any::<bool>(), n),
            prop::collection::vec(any::<bool>(), n),
        )
    })
}

proptest! {
    #[test]
    fn prop_list_matches_vec_oracle(
        seed in prop::collection::vec(any::<bool>(), 0..MAX_BITS),
        ops in prop::collection::vec(arb_list_op(), 0..40),
    ) {
        let mut list: BitList = seed.iter().copied().collect();
        let mut model = seed;
        for op in &ops {
            apply_list_op(&mut list, &mut model, op);
            prop_assert_eq!(list.len(), model.len());
        }
        let got: Vec<bool> = list.iter().collect();
        prop_assert_eq!(&got, &model);
        prop_assert_eq!(list.count_ones(), model.iter().filter(|&&b| b).count());
        prop_assert_eq!(list.index_of(true), model.iter().position(|&b| b));
        prop_assert_eq!(list.index_of(false), model.iter().position(|&b| !b));
        prop_assert_eq!(list.all_true(), model.iter().all(|&b| b));
        prop_assert_eq!(list.all_false(), model.iter().all(|&b| !b));
    }

    #[test]
    fn prop_boolean_ops_elementwise((a, b) in paired_bits()) {
        let left: BitList = a.iter().copied().collect();
        let right: BitList = b.iter().copied().collect();

        let mut and = left.clone();
        and.and(&right).unwrap();
        let mut or = left.clone();
        or.or(&right).unwrap();
        let mut xor = left.clone();
        xor.xor(&right).unwrap();

        for i in 0..a.len() {
            prop_assert_eq!(and.get(i), Some(a[i] & b[i]));
            prop_assert_eq!(or.get(i), Some(a[i] | b[i]));
            prop_assert_eq!(xor.get(i), Some(a[i] ^ b[i]));
        }

        // x & y | y == y
        let mut absorbed = and.clone();
        absorbed.or(&right).unwrap();
        prop_assert_eq!(&absorbed, &right);

        // De Morgan: !(x & y) == !x | !y
        let mut lhs = left.clone();
        lhs.and(&right).unwrap();
        lhs.not();
        let mut rhs = left.clone();
        rhs.not();
        let mut not_right = right.clone();
        not_right.not();
        rhs.or(&not_right).unwrap();
        prop_assert_eq!(&lhs, &rhs);

        // Double negation restores the operand.
        let mut back = left.clone();
        back.not();
        back.not();
        prop_assert_eq!(&back, &left);
    }

    #[test]
    fn prop_shift_roundtrip(
        seed in prop::collection::vec(any::<bool>(), 0..MAX_BITS),
        offset in any::<usize>(),
    ) {
        let original: BitList = seed.iter().copied().collect();
        let ones = original.count_ones();

        let mut shifted = original.clone();
        shifted.shift_left(offset);
        prop_assert_eq!(shifted.len(), original.len());
        prop_assert_eq!(shifted.count_ones(), ones);
        shifted.shift_right(offset);
        prop_assert_eq!(&shifted, &original);

        if !seed.is_empty() {
            let mut a = original.clone();
            let mut b = original.clone();
            a.shift_left(offset % seed.len());
            b.shift_left(offset);
            prop_assert_eq!(&a, &b);
        }
    }

    #[test]
    fn prop_insert_remove_inverse(
        seed in prop::collection::vec(any::<bool>(), 0..MAX_BITS),
        index in any::<usize>(),
        count in 0..80usize,
        value in any::<bool>(),
    ) {
        let original: BitList = seed.iter().copied().collect();
        let index = index % (seed.len() + 1);

        let mut list = original.clone();
        list.insert_range(index, count, value).unwrap();
        prop_assert_eq!(list.len(), original.len() + count);
        for i in 0..count {
            prop_assert_eq!(list.get(index + i), Some(value));
        }
        list.remove_range(index, count).unwrap();
        prop_assert_eq!(&list, &original);
    }

    #[test]
    fn prop_packed_roundtrip(bytes in prop::collection::vec(any::<u8>(), 0..40)) {
        let list = BitList::from_bytes(&bytes);
        prop_assert_eq!(list.len(), bytes.len() * 8);
        let mut out = vec![0u8; bytes.len()];
        list.copy_to_bytes(&mut out, 0).unwrap();
        prop_assert_eq!(&out, &bytes);

        let mut words = vec![0u32; bytes.len().div_ceil(4)];
        list.copy_to_words(&mut words, 0).unwrap();
        let relisted = BitList::from_words(&words);
        for i in 0..list.len() {
            prop_assert_eq!(relisted.get(i), list.get(i));
        }
    }
}

fn arb_units() -> impl Strategy<Value = Vec<u16>> {
    // Mix dense low units with arbitrary ones so several slots populate.
    prop::collection::vec(
        prop_oneof![0u16..128, any::<u16>()],
        0..120,
    )
}

proptest! {
    #[test]
    fn prop_charset_matches_btreeset(
        base in arb_units(),
        unions in arb_units(),
        excepts in arb_units(),
    ) {
        let mut set = CharSet::from_units(base.iter().copied());
        let mut model: BTreeSet<u16> = base.iter().copied().collect();
        prop_assert_eq!(set.len(), model.len());

        set.union_with(&CharSet::from_units(unions.iter().copied()));
        model.extend(unions.iter().copied());
        prop_assert_eq!(set.len(), model.len());

        set.except_with(&CharSet::from_units(excepts.iter().copied()));
        for unit in &excepts {
            model.remove(unit);
        }
        prop_assert_eq!(set.len(), model.len());

        let got: Vec<u16> = set.iter().collect();
        let want: Vec<u16> = model.iter().copied().collect();
        prop_assert_eq!(got, want);
    }

    #[test]
    fn prop_charset_intersect_symmetric(
        a in arb_units(),
        b in arb_units(),
    ) {
        let set_a = CharSet::from_units(a.iter().copied());
        let set_b = CharSet::from_units(b.iter().copied());
        let model_a: BTreeSet<u16> = a.iter().copied().collect();
        let model_b: BTreeSet<u16> = b.iter().copied().collect();

        let mut inter = set_a.clone();
        inter.intersect_with(&set_b);
        let want: Vec<u16> = model_a.intersection(&model_b).copied().collect();
        prop_assert_eq!(inter.iter().collect::<Vec<u16>>(), want);

        let mut sym = set_a.clone();
        sym.symmetric_except_with(&set_b);
        let want: Vec<u16> = model_a.symmetric_difference(&model_b).copied().collect();
        prop_assert_eq!(sym.iter().collect::<Vec<u16>>(), want);

        prop_assert_eq!(set_a.is_subset_of(&set_b), model_a.is_subset(&model_b));
        prop_assert_eq!(set_a.is_superset_of(&set_b), model_a.is_superset(&model_b));
        prop_assert_eq!(set_a.overlaps(&set_b), !model_a.is_disjoint(&model_b));
        prop_assert_eq!(set_a.set_equals(&set_b), model_a == model_b);
        prop_assert_eq!(
            set_a.is_proper_subset_of(&set_b),
            model_a.is_subset(&model_b) && model_a != model_b
        );
        prop_assert_eq!(
            set_a.is_proper_superset_of(&set_b),
            model_a.is_superset(&model_b) && model_a != model_b
        );
    }

    #[test]
    fn prop_folded_charset_canonical(units in arb_units()) {
        let folding = CaseFolding::SIMPLE;
        let set = CharSet::from_units_folded(units.iter().copied(), folding);
        let model: BTreeSet<u16> = units.iter().map(|&u| folding.to_upper(u)).collect();

        prop_assert_eq!(set.len(), model.len());
        for &unit in &units {
            prop_assert!(set.contains(unit));
            prop_assert!(set.contains(folding.to_upper(unit)));
        }

        // Enumeration visits each canonical member once, in order, with a
        // representative that folds back onto it.
        let canon: Vec<u16> = set.iter().map(|u| folding.to_upper(u)).collect();
        let want: Vec<u16> = model.iter().copied().collect();
        prop_assert_eq!(canon, want);
    }

    #[test]
    fn prop_folded_set_ops_agree_with_plain(
        a in arb_units(),
        b in arb_units(),
    ) {
        // Folding every input up front makes the folded set behave exactly
        // like a plain set over canonical units.
        let folding = CaseFolding::SIMPLE;
        let canon = |units: &[u16]| -> Vec<u16> {
            units.iter().map(|&u| folding.to_upper(u)).collect()
        };

        let mut folded = CharSet::from_units_folded(a.iter().copied(), folding);
        folded.union_with(&CharSet::from_units_folded(b.iter().copied(), folding));
        let mut plain = CharSet::from_units(canon(&a));
        plain.union_with(&CharSet::from_units(canon(&b)));
        let got: Vec<u16> = folded.iter().map(|u| folding.to_upper(u)).collect();
        prop_assert_eq!(got, plain.iter().collect::<Vec<u16>>());
        prop_assert_eq!(folded.len(), plain.len());
    }
}
