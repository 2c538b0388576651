pub(crate) mod orchestrator;
