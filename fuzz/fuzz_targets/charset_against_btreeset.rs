#![no_main]

use std::collections::BTreeSet;
use std::mem;

use bitfold::CharSet;
use libfuzzer_sys::arbitrary::{self, Arbitrary};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
enum Operation {
    Insert(u16),
    Remove(u16),
    Contains(u16),
    Clear,
    TrimExcess,
    Union,
    Except,
    Intersect,
    SymmetricExcept,
    SwapSides,
    CheckIter,
    CheckPredicates,
}

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    initial_lhs: Vec<u16>,
    initial_rhs: Vec<u16>,
    ops: Vec<Operation>,
}

/// Assert that a case-sensitive CharSet and a BTreeSet hold the same units.
fn check_equal(set: &CharSet, model: &BTreeSet<u16>) {
    assert_eq!(set.len(), model.len(), "len mismatch");
    let units: Vec<u16> = set.iter().collect();
    let expected: Vec<u16> = model.iter().copied().collect();
    assert_eq!(units, expected, "iter mismatch");
}

fuzz_target!(|input: FuzzInput| {
    let mut lhs = CharSet::from_units(input.initial_lhs.iter().copied());
    let mut lhs_model: BTreeSet<u16> = input.initial_lhs.iter().copied().collect();
    let mut rhs = CharSet::from_units(input.initial_rhs.iter().copied());
    let mut rhs_model: BTreeSet<u16> = input.initial_rhs.iter().copied().collect();

    check_equal(&lhs, &lhs_model);
    check_equal(&rhs, &rhs_model);

    for op in &input.ops {
        match *op {
            Operation::Insert(unit) => {
                assert_eq!(lhs.insert(unit), lhs_model.insert(unit), "insert({unit})");
            }
            Operation::Remove(unit) => {
                assert_eq!(lhs.remove(unit), lhs_model.remove(&unit), "remove({unit})");
            }
            Operation::Contains(unit) => {
                assert_eq!(
                    lhs.contains(unit),
                    lhs_model.contains(&unit),
                    "contains({unit})"
                );
            }
            Operation::Clear => {
                lhs.clear();
                lhs_model.clear();
            }
            Operation::TrimExcess => {
                lhs.trim_excess();
            }
            Operation::Union => {
                lhs.union_with(&rhs);
                lhs_model.extend(rhs_model.iter().copied());
            }
            Operation::Except => {
                lhs.except_with(&rhs);
                for unit in &rhs_model {
                    lhs_model.remove(unit);
                }
            }
            Operation::Intersect => {
                lhs.intersect_with(&rhs);
                lhs_model = lhs_model.intersection(&rhs_model).copied().collect();
            }
            Operation::SymmetricExcept => {
                lhs.symmetric_except_with(&rhs);
                lhs_model = lhs_model.symmetric_difference(&rhs_model).copied().collect();
            }
            Operation::SwapSides => {
                mem::swap(&mut lhs, &mut rhs);
                mem::swap(&mut lhs_model, &mut rhs_model);
            }
            Operation::CheckIter => {
                check_equal(&lhs, &lhs_model);
            }
            Operation::CheckPredicates => {
                assert_eq!(
                    lhs.is_subset_of(&rhs),
                    lhs_model.is_subset(&rhs_model),
                    "is_subset_of mismatch"
                );
                assert_eq!(
                    lhs.is_superset_of(&rhs),
                    lhs_model.is_superset(&rhs_model),
                    "is_superset_of mismatch"
                );
                assert_eq!(
                    lhs.overlaps(&rhs),
                    !lhs_model.is_disjoint(&rhs_model),
                    "overlaps mismatch"
                );
                assert_eq!(
                    lhs.set_equals(&rhs),
                    lhs_model == rhs_model,
                    "set_equals mismatch"
                );
            }
        }
    }

    check_equal(&lhs, &lhs_model);
    check_equal(&rhs, &rhs_model);
});
