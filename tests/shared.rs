use once_cell::sync::Lazy;
use thompson_regex::Regex;

static HELLO: Lazy<Regex> = Lazy::new(|| Regex::new("((Hello)|(Hi)) Worlds*").unwrap());

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn regex_is_send_and_sync() {
    assert_send_sync::<Regex>();
}

#[test]
fn shared_regex_matches_from_many_threads() {
    let inputs = [("Hello World", true), ("Hi Worldss", true), ("Hey World", false), ("Hi", false)];
    let handles: Vec<_> = (0..8)
        .map(|i| {
            std::thread::spawn(move || {
                let (input, expected) = inputs[i % inputs.len()];
                HELLO.is_match(input) == expected
            })
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap());
    }
}
