#![no_main]

use libfuzzer_sys::fuzz_target;
use lrukit::ds::RecencyList;

// Fuzz arbitrary operation sequences on RecencyList
//
// Tests random sequences of push_front, move_to_front, remove, pop_back,
// pop_front, get and clear, checking the link invariants after each step.
fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let mut list: RecencyList<u32> = RecencyList::new();
    let mut all_ids = Vec::new();

    let mut idx = 0;
    while idx + 1 < data.len() {
        let op = data[idx] % 7;
        let value = u32::from(data[idx + 1]);

        match op {
            0 => {
                // push_front
                let id = list.push_front(value);
                all_ids.push(id);

                assert_eq!(list.front(), Some(&value));
                assert_eq!(list.front_id(), Some(id));
                assert_eq!(list.get(id), Some(&value));
            }
            1 => {
                // move_to_front
                if !all_ids.is_empty() {
                    let id = all_ids[(value as usize) % all_ids.len()];
                    if list.move_to_front(id) {
                        assert_eq!(list.front_id(), Some(id));
                    } else {
                        assert!(!list.contains(id));
                    }
                }
            }
            2 => {
                // remove
                if !all_ids.is_empty() {
                    let id = all_ids.swap_remove((value as usize) % all_ids.len());
                    let old_len = list.len();
                    if list.remove(id).is_some() {
                        assert_eq!(list.len(), old_len - 1);
                        assert!(!list.contains(id));
                    }
                }
            }
            3 => {
                // pop_back
                let old_len = list.len();
                let expected = list.back().copied();
                assert_eq!(list.pop_back(), expected);
                assert_eq!(list.len(), old_len.saturating_sub(1));
            }
            4 => {
                // pop_front
                let old_len = list.len();
                let expected = list.front().copied();
                assert_eq!(list.pop_front(), expected);
                assert_eq!(list.len(), old_len.saturating_sub(1));
            }
            5 => {
                // iter agrees with len and ends
                let values: Vec<u32> = list.iter().copied().collect();
                assert_eq!(values.len(), list.len());
                assert_eq!(values.first(), list.front());
                assert_eq!(values.last(), list.back());
            }
            6 => {
                // clear
                list.clear();
                all_ids.clear();

                assert!(list.is_empty());
                assert_eq!(list.front(), None);
                assert_eq!(list.back(), None);
            }
            _ => unreachable!(),
        }

        list.check_invariants().unwrap();
        idx += 2;
    }
});
