#![no_main]

use libfuzzer_sys::fuzz_target;

const EXPORT: &str = "\
1\t\tPip3A4.Root
2\t\t|--ServiceHeader
3\t\t|--|--ProcessControl
4\t\t|--PurchaseOrder
5\t\t|--|--ProductLineItem.Choice
6\t\t|--|--|--ProductQuantity
";

fuzz_target!(|query: &str| {
    let mut session = pipview::Session::new();
    let _ = session.load(EXPORT);
    let _ = session.search(query);
    let _ = session.visible();
});
