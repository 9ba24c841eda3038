// Copyright (c) 2024 Mike Tsao

use super::Widget;
use crate::types::{Vec2, WidgetBox};

/// Stacks its visible children top to bottom, each as wide as the list. The
/// list's height becomes the sum of their heights.
#[derive(Debug)]
pub struct List {
    bounds: WidgetBox,
    is_visible: bool,
    children: Vec<Box<dyn Widget>>,
}
impl Default for List {
    fn default() -> Self {
        Self::new_with_width(0.0)
    }
}
impl List {
    /// Creates a visible list with the given width and no children.
    pub fn new_with_width(width: f32) -> Self {
        Self {
            bounds: WidgetBox::new(Vec2::ZERO, Vec2::new(width, 0.0)),
            is_visible: true,
            children: Default::default(),
        }
    }

    /// Appends a child. It won't be positioned until the next
    /// [Widget::step()].
    pub fn add_child(&mut self, child: Box<dyn Widget>) {
        self.children.push(child);
    }

    #[allow(missing_docs)]
    pub fn children(&self) -> &[Box<dyn Widget>] {
        &self.children
    }

    #[allow(missing_docs)]
    pub fn children_mut(&mut self) -> &mut [Box<dyn Widget>] {
        &mut self.children
    }

    #[allow(missing_docs)]
    pub fn set_visible(&mut self, is_visible: bool) {
        self.is_visible = is_visible;
    }

    /// Positions the children. Invisible children are skipped entirely and
    /// keep whatever geometry they had.
    fn layout(&mut self) {
        let width = self.bounds.size.x;
        let mut y = 0.0;
        for child in self.children.iter_mut().filter(|c| c.is_visible()) {
            let bounds = child.bounds_mut();
            bounds.pos = Vec2::new(0.0, y);
            bounds.size.x = width;
            y += bounds.size.y;
        }
        self.bounds.size.y = y;
    }
}
impl Widget for List {
    fn bounds(&self) -> &WidgetBox {
        &self.bounds
    }

    fn bounds_mut(&mut self) -> &mut WidgetBox {
        &mut self.bounds
    }

    fn is_visible(&self) -> bool {
        self.is_visible
    }

    /// Steps every child, then lays them out.
    fn step(&mut self) {
        self.children.iter_mut().for_each(|c| c.step());
        self.layout();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct TestBox {
        bounds: WidgetBox,
        is_visible: bool,
    }
    impl TestBox {
        fn new_with(height: f32, is_visible: bool) -> Box<Self> {
            Box::new(Self {
                bounds: WidgetBox::new(Vec2::new(123.0, 456.0), Vec2::new(7.0, height)),
                is_visible,
            })
        }
    }
    impl Widget for TestBox {
        fn bounds(&self) -> &WidgetBox {
            &self.bounds
        }

        fn bounds_mut(&mut self) -> &mut WidgetBox {
            &mut self.bounds
        }

        fn is_visible(&self) -> bool {
            self.is_visible
        }
    }

    #[test]
    fn stacks_visible_children() {
        let mut list = List::new_with_width(100.0);
        list.add_child(TestBox::new_with(10.0, true));
        list.add_child(TestBox::new_with(0.0, false));
        list.add_child(TestBox::new_with(20.0, true));
        list.step();

        assert_eq!(list.bounds().size.y, 30.0);
        let children = list.children();
        assert_eq!(children[0].bounds().pos, Vec2::new(0.0, 0.0));
        assert_eq!(children[0].bounds().size, Vec2::new(100.0, 10.0));
        assert_eq!(
            children[1].bounds(),
            &WidgetBox::new(Vec2::new(123.0, 456.0), Vec2::new(7.0, 0.0)),
            "invisible child shouldn't be touched"
        );
        assert_eq!(children[2].bounds().pos, Vec2::new(0.0, 10.0));
        assert_eq!(children[2].bounds().size, Vec2::new(100.0, 20.0));
    }

    #[test]
    fn invisible_children_contribute_nothing() {
        let mut list = List::new_with_width(50.0);
        list.add_child(TestBox::new_with(40.0, false));
        list.add_child(TestBox::new_with(15.0, true));
        list.step();
        assert_eq!(list.bounds().size.y, 15.0);
        assert_eq!(list.children()[1].bounds().pos, Vec2::ZERO);
    }

    #[test]
    fn layout_is_idempotent() {
        let mut list = List::new_with_width(80.0);
        list.add_child(TestBox::new_with(5.0, true));
        list.add_child(TestBox::new_with(6.0, true));
        list.step();
        let first: Vec<WidgetBox> = list.children().iter().map(|c| *c.bounds()).collect();
        list.step();
        let second: Vec<WidgetBox> = list.children().iter().map(|c| *c.bounds()).collect();
        assert_eq!(first, second);
        assert_eq!(list.bounds().size.y, 11.0);
    }

    #[test]
    fn empty_list_has_no_height() {
        let mut list = List::new_with_width(80.0);
        list.bounds_mut().size.y = 99.0;
        list.step();
        assert_eq!(list.bounds().size.y, 0.0);
    }

    #[test]
    fn nested_lists_are_widgets_too() {
        let mut inner = List::new_with_width(0.0);
        inner.add_child(TestBox::new_with(12.0, true));
        let mut outer = List::new_with_width(60.0);
        outer.add_child(Box::new(inner));
        outer.add_child(TestBox::new_with(3.0, true));

        // The inner list gets its width from the outer one on the first step,
        // and passes it down on the next.
        outer.step();
        outer.step();
        assert_eq!(outer.bounds().size.y, 15.0);
        assert_eq!(outer.children()[1].bounds().pos, Vec2::new(0.0, 12.0));
    }
}
