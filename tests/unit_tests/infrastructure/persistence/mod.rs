mod in_memory_vector_index_test;
