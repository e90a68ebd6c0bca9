mod decoder_test;
