//! Change notifications

use serde::Serialize;

/// Viewer property whose value changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Property {
    LayoutMode,
    FitMode,
    Zoom,
    Margin,
    Alignment,
    TileCount,
    ShowPageSeparator,
    HighlightCurrentPage,
    RenderFlags,
}

/// Something observable happened in the viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", content = "property")]
pub enum ViewerEvent {
    CurrentPageChanged,
    SelectionChanged,
    DocumentLoaded,
    DocumentClosed,
    PropertyChanged(Property),
}

type Listener = Box<dyn FnMut(&ViewerEvent)>;

/// Registered listeners, called synchronously in subscription order
#[derive(Default)]
pub struct Listeners {
    listeners: Vec<Listener>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&ViewerEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn emit(&mut self, event: ViewerEvent) {
        log::trace!("emit {:?} to {} listeners", event, self.listeners.len());
        for listener in self.listeners.iter_mut() {
            listener(&event);
        }
    }
}

impl std::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_emit_reaches_every_listener_in_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut listeners = Listeners::new();

        for id in 0..2 {
            let log = Rc::clone(&log);
            listeners.subscribe(move |event| log.borrow_mut().push((id, *event)));
        }

        listeners.emit(ViewerEvent::PropertyChanged(Property::Zoom));
        assert_eq!(
            *log.borrow(),
            vec![
                (0, ViewerEvent::PropertyChanged(Property::Zoom)),
                (1, ViewerEvent::PropertyChanged(Property::Zoom)),
            ]
        );
    }

    #[test]
    fn test_event_json_shape() {
        let json = serde_json::to_string(&ViewerEvent::PropertyChanged(Property::TileCount)).unwrap();
        assert_eq!(json, r#"{"type":"PropertyChanged","property":"TileCount"}"#);
        let json = serde_json::to_string(&ViewerEvent::SelectionChanged).unwrap();
        assert_eq!(json, r#"{"type":"SelectionChanged"}"#);
    }
}
