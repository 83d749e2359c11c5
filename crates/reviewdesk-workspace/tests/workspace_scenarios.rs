// ABOUTME: End-to-end workspace scenarios driven through UI events
// ABOUTME: Covers drag between panels, drop zones, resizing and restore across sessions

use reviewdesk_events::{PointerPosition, WorkspaceEvent as Event};
use reviewdesk_types::{SelectionChange, WorkspaceConfig};
use reviewdesk_workspace::{
    FileStorage, SaveOutcome, SharedSettings, TracingErrorReporter, WorkspaceController,
    WorkspacePersistence, WorkspaceStore,
};
use std::sync::Arc;
use std::time::Instant;
use tempfile::tempdir;

const REPO: &str = "https://github.com/acme/widgets.git";
const EPSILON: f64 = 1e-6;

fn controller_in(dir: &std::path::Path, persist: bool) -> WorkspaceController {
    let store = WorkspaceStore::new(
        WorkspacePersistence::new(Arc::new(FileStorage::new(dir))),
        Arc::new(SharedSettings::new(persist, false)),
        Arc::new(TracingErrorReporter),
    );
    WorkspaceController::new(store, &WorkspaceConfig::default())
}

fn sizes(controller: &WorkspaceController) -> Vec<f64> {
    controller
        .store()
        .workspace()
        .panels()
        .iter()
        .map(|p| p.size)
        .collect()
}

#[test]
fn test_drag_only_tab_into_neighbour_removes_panel() {
    let dir = tempdir().unwrap();
    let mut controller = controller_in(dir.path(), false);
    controller.store_mut().initialize_workspace(REPO, "main").unwrap();
    let now = Instant::now();

    controller.handle(
        &Event::FileOpened {
            file_path: "a.ts".into(),
        },
        now,
    );
    let p1 = controller.store().workspace().panels()[0].id;
    assert_eq!(sizes(&controller), vec![100.0]);

    let p2 = controller.store_mut().create_panel(Some("b.ts"));
    assert_eq!(sizes(&controller), vec![50.0, 50.0]);

    controller.handle(
        &Event::TabDragStart {
            file_path: "a.ts".into(),
            panel_id: p1,
        },
        now,
    );
    controller.handle(&Event::PanelDragOver { panel_id: p2 }, now);
    assert!(controller.drag().panel_highlight(p2).is_drag_over);

    let change = controller.handle(
        &Event::TabDrop {
            panel_id: p2,
            insert_index: None,
        },
        now,
    );
    controller.handle(&Event::TabDragEnd, now);

    let workspace = controller.store().workspace();
    assert_eq!(change, SelectionChange::Select("a.ts".into()));
    assert!(workspace.panel(p1).is_none());
    assert_eq!(workspace.panels().len(), 1);
    assert_eq!(workspace.current_tabs(p2), vec!["b.ts", "a.ts"]);
    assert_eq!(workspace.panels()[0].size, 100.0);
    assert_eq!(controller.store().selected_file(), Some("a.ts"));
}

#[test]
fn test_drop_zones_create_panels_at_edges() {
    let dir = tempdir().unwrap();
    let mut controller = controller_in(dir.path(), false);
    controller.store_mut().initialize_workspace(REPO, "main").unwrap();
    let now = Instant::now();

    let p1 = controller.store_mut().create_panel(Some("a.ts"));
    controller.store_mut().add_tab_to_panel("b.ts", Some(p1));
    controller.store_mut().add_tab_to_panel("c.ts", Some(p1));

    // Left edge inserts at the start
    controller.handle(
        &Event::TabDragStart {
            file_path: "b.ts".into(),
            panel_id: p1,
        },
        now,
    );
    controller.handle(&Event::DropZoneDragOver(PointerPosition::new(5.0, 1000.0)), now);
    assert!(controller.drag().drop_zones().left_active);
    controller.handle(&Event::DropZoneDrop(PointerPosition::new(5.0, 1000.0)), now);
    controller.handle(&Event::TabDragEnd, now);

    let panels = controller.store().workspace().panels();
    assert_eq!(panels.len(), 2);
    assert_eq!(panels[0].file_paths(), vec!["b.ts"]);
    assert_eq!(panels[1].id, p1);

    // Right edge appends
    controller.handle(
        &Event::TabDragStart {
            file_path: "c.ts".into(),
            panel_id: p1,
        },
        now,
    );
    controller.handle(&Event::DropZoneDrop(PointerPosition::new(850.0, 1000.0)), now);
    controller.handle(&Event::TabDragEnd, now);

    let panels = controller.store().workspace().panels();
    assert_eq!(panels.len(), 3);
    assert_eq!(panels[2].file_paths(), vec!["c.ts"]);
    assert_eq!(controller.store().workspace().current_tabs(p1), vec!["a.ts"]);
    let total: f64 = sizes(&controller).iter().sum();
    assert!((total - 100.0).abs() < EPSILON);

    // The middle of the container is not a drop target
    controller.handle(
        &Event::TabDragStart {
            file_path: "a.ts".into(),
            panel_id: p1,
        },
        now,
    );
    controller.handle(&Event::DropZoneDrop(PointerPosition::new(500.0, 1000.0)), now);
    controller.handle(&Event::TabDragEnd, now);
    assert_eq!(controller.store().workspace().panels().len(), 3);
    assert!(controller.drag().dragged_tab().is_none());
}

#[test]
fn test_self_drop_leaves_layout_untouched() {
    let dir = tempdir().unwrap();
    let mut controller = controller_in(dir.path(), false);
    controller.store_mut().initialize_workspace(REPO, "main").unwrap();
    let now = Instant::now();

    let p1 = controller.store_mut().create_panel(Some("a.ts"));
    controller.store_mut().add_tab_to_panel("b.ts", Some(p1));
    let before = controller.store().workspace().clone();
    let revision = controller.store().revision();

    controller.handle(
        &Event::TabDragStart {
            file_path: "a.ts".into(),
            panel_id: p1,
        },
        now,
    );
    controller.handle(
        &Event::TabDrop {
            panel_id: p1,
            insert_index: Some(1),
        },
        now,
    );

    assert_eq!(controller.store().workspace(), &before);
    assert_eq!(controller.store().revision(), revision);
}

#[test]
fn test_resize_clamps_to_minimum_width() {
    let dir = tempdir().unwrap();
    let mut controller = controller_in(dir.path(), false);
    controller.store_mut().initialize_workspace(REPO, "main").unwrap();
    let now = Instant::now();

    controller.store_mut().create_panel(Some("a.ts"));
    controller.store_mut().create_panel(Some("b.ts"));
    controller.handle(&Event::ContainerResized { width_px: 1000.0 }, now);

    controller.handle(
        &Event::PanelResize {
            panel_index: 0,
            divider_position_px: 40.0,
        },
        now,
    );
    assert_eq!(sizes(&controller), vec![10.0, 90.0]);
}

#[test]
fn test_layout_survives_restart() {
    let dir = tempdir().unwrap();
    let now = Instant::now();

    {
        let mut controller = controller_in(dir.path(), true);
        controller.store_mut().load_workspaces_from_storage();
        controller.store_mut().initialize_workspace(REPO, "main").unwrap();

        controller.handle(
            &Event::FileOpened {
                file_path: "a.ts".into(),
            },
            now,
        );
        controller.handle(
            &Event::FileOpened {
                file_path: "b.ts".into(),
            },
            now,
        );
        let p1 = controller.store().workspace().panels()[0].id;
        controller.handle(
            &Event::TabDragStart {
                file_path: "b.ts".into(),
                panel_id: p1,
            },
            now,
        );
        controller.handle(&Event::DropZoneDrop(PointerPosition::new(990.0, 1000.0)), now);
        controller.handle(
            &Event::FileOpened {
                file_path: "c.ts".into(),
            },
            now,
        );
        assert_eq!(controller.flush(), Some(SaveOutcome::Saved));
    }

    let mut controller = controller_in(dir.path(), true);
    assert_eq!(controller.store_mut().load_workspaces_from_storage().len(), 1);
    let files = controller
        .store_mut()
        .initialize_workspace(REPO, "main")
        .unwrap();
    assert_eq!(files, vec!["a.ts", "c.ts", "b.ts"]);

    let workspace = controller.store().workspace();
    assert_eq!(workspace.panels().len(), 2);
    assert_eq!(workspace.panels()[0].file_paths(), vec!["a.ts", "c.ts"]);
    assert_eq!(workspace.panels()[1].file_paths(), vec!["b.ts"]);
    assert_eq!(controller.store().selected_file(), Some("a.ts"));

    // Another branch of the same repository starts empty
    controller
        .store_mut()
        .initialize_workspace(REPO, "develop")
        .unwrap();
    assert!(controller.store().workspace().is_empty());
}
