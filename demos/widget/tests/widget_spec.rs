//! Specification of the demo widget written with `spec-bdd`.

use rstest::rstest;
use spec_bdd::{
    Spec, Suite, be_false, be_true, check_eq, contain, equal, expect, satisfy, spec_log,
};
use widget_demo::{Widget, WidgetError};

struct WidgetSpec {
    spec: Spec,
    widget: Widget,
}

impl WidgetSpec {
    fn new(capacity: usize) -> Self {
        Self {
            spec: Spec::new(),
            widget: Widget::new("gizmo", capacity),
        }
    }
}

impl Suite for WidgetSpec {
    fn spec(&self) -> &Spec {
        &self.spec
    }

    fn spec_mut(&mut self) -> &mut Spec {
        &mut self.spec
    }

    fn before(&mut self) {
        self.widget = Widget::new("gizmo", 2);
    }
}

#[test]
fn widget_behaviour() {
    let mut suite = WidgetSpec::new(2);
    suite.run_test(|s| {
        s.describe("Widget", |s| {
            s.it("starts empty", |s| {
                expect(s.widget.parts().len()).to(equal(0));
                expect(s.widget.is_full()).to(be_false());
            });

            s.describe("attach", |s| {
                s.it("keeps parts in order", |s| {
                    check_eq!(s.widget.attach("bolt"), Ok(()));
                    check_eq!(s.widget.attach("nut"), Ok(()));
                    spec_log!(s, "parts: {:?}", s.widget.parts());
                    expect(s.widget.parts().to_vec()).to(contain("nut".to_owned()));
                    expect(s.widget.is_full()).to(be_true());
                });

                s.it("rejects duplicates", |s| {
                    check_eq!(s.widget.attach("bolt"), Ok(()));
                    expect(s.widget.attach("bolt"))
                        .to(equal(Err(WidgetError::DuplicatePart("bolt".into()))));
                });

                s.it("rejects parts beyond capacity", |s| {
                    for part in ["a", "b"] {
                        check_eq!(s.widget.attach(part), Ok(()));
                    }
                    expect(s.widget.attach("c")).to(equal(Err(WidgetError::Full(2))));
                });
            });

            s.it("detaches attached parts only", |s| {
                check_eq!(s.widget.attach("spring"), Ok(()));
                expect(s.widget.detach("spring")).to(be_true());
                expect(s.widget.detach("spring")).to(be_false());
            });
        });
    });
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(3)]
fn capacity_bounds_attachments(#[case] capacity: usize) {
    let mut spec = Spec::new();
    spec.run_test(|s| {
        s.describe(format!("Widget with capacity {capacity}"), |s| {
            s.it("accepts exactly that many parts", |_| {
                let mut widget = Widget::new("bounded", capacity);
                let accepted = (0..capacity + 1)
                    .filter(|index| widget.attach(format!("part-{index}")).is_ok())
                    .count();
                expect(accepted).to(equal(capacity));
                expect(widget.name()).to(satisfy("be named", |name: &&str| !name.is_empty()));
            });
        });
    });
}
