mod remote_whisper_engine_test;
