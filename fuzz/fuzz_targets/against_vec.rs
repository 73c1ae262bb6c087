#![no_main]

use bitfold::BitList;
use libfuzzer_sys::arbitrary::{self, Arbitrary};
use libfuzzer_sys::fuzz_target;

// Keeps random insertions from growing the list without bound.
const MAX_GROWTH: usize = 256;

#[derive(Arbitrary, Debug)]
enum Operation {
    Push(bool),
    Set(u16, bool),
    Get(u16),
    InsertRange(u16, u8, bool),
    RemoveRange(u16, u16),
    Fill(u16, u16, bool),
    ExtendWith(u8, bool),
    Truncate(u16),
    ShiftLeft(u16),
    ShiftRight(u16),
    Not,
    CheckCounts,
    CheckIter,
    CheckExports,
}

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    initial: Vec<bool>,
    ops: Vec<Operation>,
}

/// Assert that a BitList and a Vec<bool> hold the same sequence.
fn check_equal(list: &BitList, model: &[bool]) {
    assert_eq!(list.len(), model.len(), "len mismatch");
    let bits: Vec<bool> = list.iter().collect();
    assert_eq!(bits, model, "iter mismatch");
}

fuzz_target!(|input: FuzzInput| {
    let mut list: BitList = input.initial.iter().copied().collect();
    let mut model = input.initial;

    for op in &input.ops {
        let len = model.len();
        match *op {
            Operation::Push(v) => {
                list.push(v);
                model.push(v);
            }
            Operation::Set(i, v) => {
                let i = i as usize;
                if i < len {
                    list.set(i, v).unwrap();
                    model[i] = v;
                } else {
                    assert!(list.set(i, v).is_err());
                }
            }
            Operation::Get(i) => {
                let i = i as usize;
                assert_eq!(list.get(i), model.get(i).copied(), "get({i}) mismatch");
            }
            Operation::InsertRange(i, n, v) => {
                let i = i as usize % (len + 1);
                let n = (n as usize).min(MAX_GROWTH.saturating_sub(len));
                list.insert_range(i, n, v).unwrap();
                for k in 0..n {
                    model.insert(i + k, v);
                }
            }
            Operation::RemoveRange(i, n) => {
                let i = i as usize % (len + 1);
                let n = n as usize % (len - i + 1);
                list.remove_range(i, n).unwrap();
                model.drain(i..i + n);
            }
            Operation::Fill(i, n, v) => {
                let i = i as usize % (len + 1);
                let n = n as usize % (len - i + 1);
                list.fill(i, n, v).unwrap();
                for slot in &mut model[i..i + n] {
                    *slot = v;
                }
            }
            Operation::ExtendWith(n, v) => {
                let n = (n as usize).min(MAX_GROWTH.saturating_sub(len));
                list.extend_with(n, v);
                model.extend(std::iter::repeat(v).take(n));
            }
            Operation::Truncate(n) => {
                let n = n as usize % (len + 1);
                list.truncate(n);
                model.truncate(n);
            }
            Operation::ShiftLeft(k) => {
                list.shift_left(k as usize);
                if len > 0 {
                    model.rotate_right(k as usize % len);
                }
            }
            Operation::ShiftRight(k) => {
                list.shift_right(k as usize);
                if len > 0 {
                    model.rotate_left(k as usize % len);
                }
            }
            Operation::Not => {
                list.not();
                for bit in model.iter_mut() {
                    *bit = !*bit;
                }
            }
            Operation::CheckCounts => {
                assert_eq!(
                    list.count_ones(),
                    model.iter().filter(|&&b| b).count(),
                    "count_ones mismatch"
                );
                assert_eq!(list.index_of(true), model.iter().position(|&b| b));
                assert_eq!(list.index_of(false), model.iter().position(|&b| !b));
                assert_eq!(list.all_true(), model.iter().all(|&b| b));
                assert_eq!(list.all_false(), model.iter().all(|&b| !b));
            }
            Operation::CheckIter => {
                check_equal(&list, &model);
            }
            Operation::CheckExports => {
                let mut bytes = vec![0u8; model.len().div_ceil(8)];
                list.copy_to_bytes(&mut bytes, 0).unwrap();
                for (i, &bit) in model.iter().enumerate() {
                    let got = bytes[i / 8] >> (i % 8) & 1 == 1;
                    assert_eq!(got, bit, "byte export mismatch at {i}");
                }

                let mut bools = vec![false; model.len()];
                list.copy_to_bools(&mut bools, 0).unwrap();
                assert_eq!(bools, model, "bool export mismatch");
            }
        }
    }

    check_equal(&list, &model);
});
