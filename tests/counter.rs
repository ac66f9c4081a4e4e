//! End-to-end scenarios: the counter round trip and static generation.

use std::cell::Cell;
use std::rc::Rc;

use rill::{App, Builder, Props, State, render_static};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn app_with_anchor() -> App {
    let app = App::new();
    {
        let mut doc = app.document_mut();
        let anchor = doc.create_element("div");
        doc.set_attribute(anchor, "id", "app");
        let root = doc.root();
        doc.append(root, anchor);
    }
    app
}

#[test]
fn counter_round_trip() {
    init_tracing();

    let count = State::new(0).debug(true);
    let invocations = Rc::new(Cell::new(0_u32));
    let app = app_with_anchor();

    let c = count.clone();
    let calls = invocations.clone();
    app.mount("#app", move |b| {
        let c = c.clone();
        let calls = calls.clone();
        b.div((
            Props::new().id("counter").watch(&c),
            move |b: &mut Builder| {
                calls.set(calls.get() + 1);
                b.text(format!("Count: {}", c.get()));
            },
        ));
    })
    .unwrap();

    assert_eq!(invocations.get(), 1, "initial construction");

    count.set(count.get() + 1);
    count.set(count.get() + 1);
    count.set(count.get() + 1);

    let doc = app.document();
    let counter = doc.select("#counter").unwrap();
    assert_eq!(doc.text_content(counter), "Count: 3");
    assert_eq!(
        invocations.get(),
        4,
        "exactly three rebuilds on top of the initial construction"
    );
}

#[test]
fn handler_driven_counter() {
    init_tracing();

    let count = State::new(0);
    let app = app_with_anchor();

    let c = count.clone();
    let on_click = count.clone();
    app.mount("#app", move |b| {
        let c = c.clone();
        b.span((Props::new().id("value").watch(&c), move |b: &mut Builder| {
            b.text(c.get());
        }));
        b.button((
            Props::new().on("click", move |_event| {
                on_click.update(|n| n + 1);
            }),
            "+1",
        ));
    })
    .unwrap();

    let button = app.document().select("button").unwrap();
    for _ in 0..5 {
        assert!(app.dispatch(button, "click"));
    }

    let doc = app.document();
    let value = doc.select("#value").unwrap();
    assert_eq!(doc.text_content(value), "5");
}

#[test]
fn static_generation_is_pure() {
    let page = |b: &mut Builder| {
        b.h1("Pipes & <valves>");
        b.ul(|b: &mut Builder| {
            for item in ["a", "b"] {
                b.li(item);
            }
        });
        b.input(Props::new().flag("disabled", true).attr("type", "text"));
        b.button((
            Props::new().on("click", |_event| unreachable!("static output never fires handlers")),
            "noop",
        ));
    };

    let first = render_static(page);
    let second = render_static(page);
    assert_eq!(first, second, "no hidden state across calls");
    assert_eq!(
        first,
        "<h1>Pipes &amp; &lt;valves&gt;</h1>\
         <ul><li>a</li><li>b</li></ul>\
         <input disabled type=\"text\"/>\
         <button>noop</button>"
    );
}

#[test]
fn static_generation_ignores_watches() {
    let cell = State::new(7);
    let c = cell.clone();
    let html = render_static(move |b: &mut Builder| {
        let c = c.clone();
        b.div((Props::new().watch(&c), move |b: &mut Builder| {
            b.text(c.get());
        }));
    });
    assert_eq!(html, "<div>7</div>");

    // The throwaway runtime is gone; mutating the cell is inert.
    cell.set(8);
}
