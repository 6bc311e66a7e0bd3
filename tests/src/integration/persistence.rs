//! # Persistence Flows
//!
//! The file-backed node must come back exactly as it was left, and must never
//! persist a write that failed.

#[cfg(test)]
mod tests {
    use papyrus_core::{
        BlockApi, BlockDraft, BlockId, BlockType, MoveDirection, OrderUpdate, OrderingApi,
        StreamApi,
    };
    use papyrus_node::config::{NodeConfig, StorageBackend};
    use papyrus_node::NodeRuntime;
    use std::net::{IpAddr, Ipv4Addr};
    use std::path::Path;

    fn file_config(path: &Path) -> NodeConfig {
        let mut config = NodeConfig::default();
        config.gateway.http.host = IpAddr::V4(Ipv4Addr::LOCALHOST);
        config.gateway.http.port = 0;
        config.storage.backend = StorageBackend::File;
        config.storage.data_file = path.to_path_buf();
        config
    }

    #[tokio::test]
    async fn test_reorder_and_move_survive_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("papyrus.json");

        let stream_id = {
            let node = NodeRuntime::new(file_config(&path)).unwrap();
            let notebook = node.notebook();

            let stream = notebook.create_stream("Persisted").await.unwrap().stream;
            let mut ids = Vec::new();
            for (order, content) in ["a", "b", "c"].into_iter().enumerate() {
                let block = notebook
                    .create_block(BlockDraft::new(
                        stream.id.clone(),
                        BlockType::Markdown,
                        content,
                        order as u32,
                    ))
                    .await
                    .unwrap();
                ids.push(block.id);
            }

            notebook
                .reorder_blocks(vec![
                    OrderUpdate::new(ids[0].clone(), 2),
                    OrderUpdate::new(ids[2].clone(), 0),
                ])
                .await
                .unwrap();
            notebook
                .move_block(&ids[1], MoveDirection::Down)
                .await
                .unwrap();
            notebook
                .update_block(&ids[0], papyrus_core::BlockPatch::in_context(false))
                .await
                .unwrap();
            stream.id
        };

        let node = NodeRuntime::new(file_config(&path)).unwrap();
        let detail = node.notebook().get_stream(&stream_id).await.unwrap();

        let layout: Vec<(&str, u32, bool)> = detail
            .blocks
            .iter()
            .map(|b| (b.content.as_str(), b.order, b.in_context))
            .collect();
        assert_eq!(
            layout,
            vec![("c", 0, true), ("a", 1, false), ("b", 2, true)]
        );
    }

    #[tokio::test]
    async fn test_failed_reorder_not_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("papyrus.json");

        let (stream_id, before) = {
            let node = NodeRuntime::new(file_config(&path)).unwrap();
            let notebook = node.notebook();
            let stream = notebook.create_stream("Atomic").await.unwrap().stream;
            let block = notebook
                .create_block(BlockDraft::new(stream.id.clone(), BlockType::Prompt, "p", 0))
                .await
                .unwrap();

            let err = notebook
                .reorder_blocks(vec![
                    OrderUpdate::new(block.id.clone(), 9),
                    OrderUpdate::new(BlockId::new("ghost"), 0),
                ])
                .await
                .unwrap_err();
            assert_eq!(err.to_string(), "Block not found");
            (stream.id, std::fs::read(&path).unwrap())
        };

        assert_eq!(std::fs::read(&path).unwrap(), before);

        let node = NodeRuntime::new(file_config(&path)).unwrap();
        let detail = node.notebook().get_stream(&stream_id).await.unwrap();
        assert_eq!(detail.blocks[0].order, 0);
    }

    #[tokio::test]
    async fn test_stream_delete_cascades_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("papyrus.json");

        {
            let node = NodeRuntime::new(file_config(&path)).unwrap();
            let notebook = node.notebook();
            let keep = notebook.create_stream("Keep").await.unwrap().stream;
            let gone = notebook.create_stream("Drop").await.unwrap().stream;
            for stream_id in [&keep.id, &gone.id] {
                notebook
                    .create_block(BlockDraft::new(stream_id.clone(), BlockType::Markdown, "x", 0))
                    .await
                    .unwrap();
            }
            notebook.delete_stream(&gone.id).await.unwrap();
        }

        let snapshot: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(snapshot["streams"].as_array().unwrap().len(), 1);
        assert_eq!(snapshot["blocks"].as_array().unwrap().len(), 1);
        assert_eq!(snapshot["streams"][0]["name"], "Keep");
    }
}
