use doundo::{from_fn, Manager, Signal};
use std::collections::HashMap;
use std::sync::mpsc;

type Document = HashMap<&'static str, i64>;

fn add(
    field: &'static str,
    amount: i64,
) -> doundo::FromFn<impl FnMut(&mut Document) -> bool, impl FnMut(&mut Document) -> bool, Document> {
    from_fn(
        format!("add {amount} to {field}"),
        move |doc: &mut Document| {
            *doc.entry(field).or_default() += amount;
            true
        },
        move |doc: &mut Document| {
            *doc.entry(field).or_default() -= amount;
            true
        },
    )
}

fn main() -> doundo::Result<()> {
    let (sender, receiver) = mpsc::channel();
    let mut left = Document::new();
    let mut right = Document::new();
    let mut manager = Manager::builder().connect(sender).build();

    for amount in [1, 2, 3] {
        let mut action = add("width", amount);
        doundo::Action::apply(&mut action, &mut left)?;
        manager.add_done_action("left", action);
    }
    let mut action = add("height", 10);
    doundo::Action::apply(&mut action, &mut right)?;
    manager.add_done_action("right", action);

    manager.roll_back("left", &mut left)?;
    manager.single_do("left", &mut left)?;

    println!("left:  {left:?}");
    println!("right: {right:?}");
    println!("left can redo:\n{}", manager.do_action_description("left"));
    for signal in receiver.try_iter() {
        if let Signal::Changes(n) = signal {
            println!("changes: {n}");
        }
    }
    Ok(())
}
